//! Error taxonomy for API calls.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` uses the variant, never message content
//! - Cancellation and disposal are their own variants, not generic failures
//! - All errors include ErrorLocation and are built with `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use serde::Deserialize;
use thiserror::Error as ThisError;

/// Marker the server puts in the body when a credential lacks privilege.
pub const INSUFFICIENT_SCOPE: &str = "insufficient_scope";

/// Outcome of a single logical call. `Ok` is success; `Err` carries the
/// classified reason, with [`ApiError::Cancelled`] as the distinct
/// cancelled outcome.
pub type CallResult<T> = Result<T, ApiError>;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Transport Timeout: {message} {location}")]
    TransportTimeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Error: {status_code} - {body} {location}")]
    Http {
        status_code: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Call cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error("Client disposed {location}")]
    Disposed { location: ErrorLocation },

    #[error("Gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ApiError>,
        location: ErrorLocation,
    },

    #[error("Endpoint Error: {message} {location}")]
    Endpoint {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected Error: {message} {location}")]
    Unexpected {
        message: String,
        location: ErrorLocation,
    },
}

/// Error body shape the server uses for rejected calls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerErrorBody {
    error_code: String,
}

impl ApiError {
    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        ApiError::TransportTimeout {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn http(status_code: u16, body: impl Into<String>) -> Self {
        ApiError::Http {
            status_code: HttpStatusCode(status_code),
            body: body.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn encode(message: impl Into<String>) -> Self {
        ApiError::Encode {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        ApiError::Cancelled {
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn disposed() -> Self {
        ApiError::Disposed {
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn retries_exhausted(attempts: u32, last: ApiError) -> Self {
        ApiError::RetriesExhausted {
            attempts,
            source: Box::new(last),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::Unexpected {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        // Check for specific error kinds BEFORE converting to string
        if error.is_timeout() {
            return ApiError::timeout(error.to_string());
        }

        if error.is_connect() || error.is_request() || error.is_body() {
            return ApiError::transport(error.to_string());
        }

        if let Some(status) = error.status() {
            return ApiError::http(status.as_u16(), error.to_string());
        }

        ApiError::unexpected(error.to_string())
    }

    /// Only transport-level failures are worth repeating. An HTTP error is a
    /// deterministic rejection and repeating it would not change the answer.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::TransportTimeout { .. } => true,
            ApiError::Transport { .. } => true,

            ApiError::Http { .. } => false,
            ApiError::Decode { .. } => false,
            ApiError::Encode { .. } => false,
            ApiError::Cancelled { .. } => false,
            ApiError::Disposed { .. } => false,
            ApiError::RetriesExhausted { .. } => false,
            ApiError::Endpoint { .. } => false,
            ApiError::Unexpected { .. } => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled { .. })
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, ApiError::Disposed { .. })
    }

    /// The innermost cause, looking through [`ApiError::RetriesExhausted`].
    pub fn last_cause(&self) -> &ApiError {
        match self {
            ApiError::RetriesExhausted { source, .. } => source.last_cause(),
            other => other,
        }
    }

    /// True when the server rejected the call because the credential lacks
    /// the required privilege. Callers should suggest logging in with a
    /// higher privilege rather than retrying.
    pub fn is_insufficient_scope(&self) -> bool {
        match self.last_cause() {
            ApiError::Http { body, .. } => body.contains(INSUFFICIENT_SCOPE),
            _ => false,
        }
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self.last_cause() {
            ApiError::Http { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// `errorCode` from a JSON error body, e.g. `"insufficient_scope"`.
    pub fn server_error_code(&self) -> Option<String> {
        match self.last_cause() {
            ApiError::Http { body, .. } => serde_json::from_str::<ServerErrorBody>(body)
                .ok()
                .map(|parsed| parsed.error_code),
            _ => None,
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::TransportTimeout { .. } => "timeout",
            ApiError::Transport { .. } => "transport",
            ApiError::Http { .. } if self.is_insufficient_scope() => "insufficient_scope",
            ApiError::Http { status_code, .. } if status_code.is_auth_rejection() => "auth",
            ApiError::Http { status_code, .. } if status_code.is_client_error() => "client_error",
            ApiError::Http { status_code, .. } if status_code.is_server_error() => "server_error",
            ApiError::Http { .. } => "http",
            ApiError::Decode { .. } => "decode",
            ApiError::Encode { .. } => "encode",
            ApiError::Cancelled { .. } => "cancelled",
            ApiError::Disposed { .. } => "disposed",
            ApiError::RetriesExhausted { .. } => "retries_exhausted",
            ApiError::Endpoint { .. } => "endpoint",
            ApiError::Unexpected { .. } => "unexpected",
        }
    }
}

impl From<ModelError> for ApiError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ApiError::Endpoint {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
