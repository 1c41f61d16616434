mod auth;
mod call;
mod lifecycle;
mod operations;
mod retry;
