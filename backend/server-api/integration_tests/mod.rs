mod client;
mod helpers;
