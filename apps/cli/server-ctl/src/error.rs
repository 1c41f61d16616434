use common::ErrorLocation;
use server_api::ApiError;
use server_api::error::ConfigError;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the command-line tool.
///
/// Library errors are flattened to messages so the whole error can be
/// printed as JSON by scripts wrapping the tool.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CtlError {
    /// Local failure: file I/O, logger setup, bad arguments.
    #[error("Ctl Error: {message} {location}")]
    Ctl {
        message: String,
        location: ErrorLocation,
    },

    /// The server call failed.
    #[error("API Error [{category}]: {message}")]
    Api {
        message: String,
        category: String,
        insufficient_scope: bool,
        location: ErrorLocation,
    },

    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}

impl CtlError {
    #[track_caller]
    pub fn ctl(message: impl Into<String>) -> Self {
        CtlError::Ctl {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// True when logging in with a higher privilege would let the command succeed.
    pub fn is_insufficient_scope(&self) -> bool {
        matches!(
            self,
            CtlError::Api {
                insufficient_scope: true,
                ..
            }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CtlError::Api { category, .. } if category == "cancelled")
    }
}

impl From<ApiError> for CtlError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        CtlError::Api {
            message: error.to_string(),
            category: error.error_category().to_string(),
            insufficient_scope: error.is_insufficient_scope(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ConfigError> for CtlError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CtlError::Config {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
