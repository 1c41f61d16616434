//! Shared primitives for the dedicated-server management workspace.
//!
//! Everything here is dependency-light and free of I/O so that every other
//! crate can use it without pulling in the HTTP stack.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, status codes, secret handling
//! - **models**: wire payloads exchanged with the game server
//! - **server-api**: the HTTPS API client and session protocol
//! - **server-ctl**: command-line wiring around the client

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
