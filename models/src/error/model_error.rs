use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Endpoint URL Error: {message} {location}")]
    EndpointUrl {
        message: String,
        location: ErrorLocation,
    },
}
