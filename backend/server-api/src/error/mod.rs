pub mod api;
pub mod config;

pub use api::{ApiError, CallResult};
pub use config::ConfigError;
