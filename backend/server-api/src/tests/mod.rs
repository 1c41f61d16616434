mod auth;
mod config;
mod envelope;
mod retry;
