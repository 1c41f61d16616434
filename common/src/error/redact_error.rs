use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a secret wrapper is asked to leave the process through serde.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
