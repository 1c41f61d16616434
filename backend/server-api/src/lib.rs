pub mod auth;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod retry;
pub mod transport;

#[cfg(test)]
mod tests;

pub use auth::{AuthContext, Credential};
pub use client::login::LoginOutcome;
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::api::{ApiError, CallResult};
pub use retry::RetryPolicy;

pub use models::{API_PATH, API_VERSION};

/// Port the dedicated server's HTTPS API listens on unless reconfigured.
pub const SERVER_DEFAULT_PORT: u16 = 7777;
