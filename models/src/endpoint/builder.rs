use crate::endpoint::{API_PATH, Endpoint, Scheme};
use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use url::Url;

/// Builder for creating validated [`Endpoint`] instances.
///
/// Host and port are required. The scheme defaults to HTTPS; the server only
/// speaks TLS (usually with a self-signed certificate).
#[derive(Debug, Default)]
pub struct EndpointBuilder {
    host: Option<String>,
    port: Option<u16>,
    scheme: Option<Scheme>,
}

impl EndpointBuilder {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Build the Endpoint with validation.
    #[track_caller]
    pub fn build(self) -> Result<Endpoint, ModelError> {
        let host = self.host.ok_or_else(|| ModelError::Validation {
            message: String::from("Host is required"),
            location: ErrorLocation::caller(),
        })?;

        let host = host.trim().to_string();
        if host.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Host cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
            return Err(ModelError::Validation {
                message: format!("Host must be a bare hostname or address: {host}"),
                location: ErrorLocation::caller(),
            });
        }

        let port = self.port.ok_or_else(|| ModelError::Validation {
            message: String::from("Port is required"),
            location: ErrorLocation::caller(),
        })?;

        if port == 0 {
            return Err(ModelError::Validation {
                message: String::from("Port must be non-zero"),
                location: ErrorLocation::caller(),
            });
        }

        let scheme = self.scheme.unwrap_or_default();

        // Bare IPv6 literals need brackets before a port can follow.
        let url_host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.clone()
        };

        let base_url = Url::parse(&format!(
            "{}://{url_host}:{port}{API_PATH}",
            scheme.as_str()
        ))
        .map_err(|e| ModelError::EndpointUrl {
            message: format!("{e} (host: {host})"),
            location: ErrorLocation::caller(),
        })?;

        Ok(Endpoint {
            host,
            port,
            scheme,
            base_url,
        })
    }
}
