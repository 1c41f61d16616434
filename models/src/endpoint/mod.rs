//! Where API calls are sent.
//!
//! The server exposes one URL, `https://{host}:{port}/api/v1`. Every function
//! is a POST to that URL; the envelope's `function` field does the routing.

pub mod builder;

use std::fmt::{Display, Formatter, Result as FormatResult};

use const_format::concatcp;
use url::Url;

pub const API_VERSION: &str = "v1";

/// Versioned path shared by every function.
pub const API_PATH: &str = concatcp!("/api/", API_VERSION);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP, for loopback fixtures standing in for a server in tests.
    Http,
}

impl Scheme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// A validated server address. Construct with [`builder::EndpointBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) scheme: Scheme,
    pub(crate) base_url: Url,
}

impl Endpoint {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The single URL all function calls are POSTed to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Display for Endpoint {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.base_url)
    }
}
