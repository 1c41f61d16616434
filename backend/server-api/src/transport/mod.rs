//! HTTPS transport for the single API endpoint.
//!
//! One `reqwest::Client` is shared by every call on an [`crate::ApiClient`].
//! It accepts self-signed certificates unconditionally: dedicated servers
//! generate their own certificate on first start and are normally reached
//! by IP address, so there is nothing to validate against.
//!
//! The client handle is released exactly once through [`Transport::release`];
//! afterwards [`Transport::handle`] fails with [`ApiError::Disposed`] and no
//! network I/O is attempted.

use crate::error::ApiError;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use log::{debug, trace, warn};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use url::Url;

pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const JSON_CONTENT_TYPE: &str = "application/json";
const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";
const MULTIPART_DATA_PART: &str = "data";
const MULTIPART_FILE_PART: &str = "saveGameFile";

/// Body of one outgoing request. Kept owned so every retry can rebuild it.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Encoded request envelope.
    Json(Vec<u8>),
    /// Envelope plus a file, sent as `multipart/form-data`.
    Multipart {
        envelope: Vec<u8>,
        file_name: String,
        file: Vec<u8>,
    },
}

pub struct Transport {
    client: RwLock<Option<Client>>,
    timeout: Duration,
}

impl Transport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ApiError::from_reqwest(&e))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cheap clone of the underlying client, or `Disposed` once released.
    #[track_caller]
    pub fn handle(&self) -> Result<Client, ApiError> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(ApiError::disposed)
    }

    /// Release the connection pool. Returns `true` only for the call that
    /// actually released it.
    pub fn release(&self) -> bool {
        let released = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        released.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

/// POST `body` to `url` and return the raw 2xx body.
///
/// Non-2xx statuses become [`ApiError::Http`] with the body text kept
/// verbatim for diagnostics. A 2xx body cut off mid-read is a retryable
/// [`ApiError::Transport`].
pub async fn send(
    client: &Client,
    url: &Url,
    authorization: Option<&str>,
    body: &RequestBody,
) -> Result<Vec<u8>, ApiError> {
    let mut request = client.post(url.clone());

    if let Some(value) = authorization {
        request = request.header(AUTHORIZATION, value);
    }

    request = match body {
        RequestBody::Json(envelope) => request
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(envelope.clone()),
        RequestBody::Multipart {
            envelope,
            file_name,
            file,
        } => {
            let data_part = Part::bytes(envelope.clone())
                .mime_str(JSON_CONTENT_TYPE)
                .map_err(|e| ApiError::from_reqwest(&e))?;
            let file_part = Part::bytes(file.clone())
                .file_name(file_name.clone())
                .mime_str(OCTET_STREAM_CONTENT_TYPE)
                .map_err(|e| ApiError::from_reqwest(&e))?;

            request.multipart(
                Form::new()
                    .part(MULTIPART_DATA_PART, data_part)
                    .part(MULTIPART_FILE_PART, file_part),
            )
        }
    };

    let response = request.send().await.map_err(|e| ApiError::from_reqwest(&e))?;
    let status = response.status();
    trace!("Received HTTP {} from {url}", status.as_u16());

    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read HTTP {} error body: {e}", status.as_u16());
                format!("<unreadable body: {e}>")
            }
        };
        debug!("Server rejected call: HTTP {} - {body}", status.as_u16());
        return Err(ApiError::http(status.as_u16(), body));
    }

    let bytes = response.bytes().await.map_err(|e| body_read_error(&e))?;
    Ok(bytes.to_vec())
}

/// A 2xx body that stops short is a broken connection, not a protocol error.
#[track_caller]
fn body_read_error(error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::timeout(error.to_string());
    }
    ApiError::transport(format!("response body interrupted: {error}"))
}
