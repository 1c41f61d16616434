//! Wire models for the dedicated server HTTPS API.
//!
//! This crate contains pure data structures: the request and response
//! payloads carried inside the `{function, data}` envelope, the server
//! function names, and the validated [`Endpoint`] every call is sent to.
//! Nothing here performs I/O.
//!
//! Field names are lower camel case on the wire. The server matches them
//! case-sensitively, so every payload struct uses
//! `#[serde(rename_all = "camelCase")]` rather than hand-written renames.

pub mod endpoint;
pub mod error;
pub mod function;
pub mod payloads;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use endpoint::builder::EndpointBuilder;
pub use endpoint::{API_PATH, API_VERSION, Endpoint, Scheme};
pub use error::model_error::ModelError;
pub use function::ApiFunction;
pub use payloads::*;
