use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Failures loading, saving, or validating the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Client Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Client Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Client Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Client Config Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Client Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Environment Error: {variable}: {reason} {location}")]
    Environment {
        location: ErrorLocation,
        variable: String,
        reason: String,
    },
}
