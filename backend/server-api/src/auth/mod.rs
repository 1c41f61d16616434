//! Credential tracking and `Authorization` header selection.
//!
//! Two tokens can be held at once: a long-lived application token generated
//! on the server, and a session token obtained by logging in. The
//! application token always wins.

use common::RedactedToken;

const BEARER_PREFIX: &str = "Bearer ";

/// The credential attached to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    None,
    SessionToken(RedactedToken),
    ApplicationToken(RedactedToken),
}

impl Credential {
    /// `Bearer <token>`, or `None` when no credential is held.
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Credential::None => None,
            Credential::SessionToken(token) | Credential::ApplicationToken(token) => {
                Some(format!("{BEARER_PREFIX}{}", token.as_str()))
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Credential::None)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::None => "none",
            Credential::SessionToken(_) => "session",
            Credential::ApplicationToken(_) => "application",
        }
    }
}

/// Holds both tokens and resolves which one a request carries.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    application_token: Option<RedactedToken>,
    session_token: Option<RedactedToken>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application_token(token: impl Into<String>) -> Self {
        Self {
            application_token: RedactedToken::non_empty(token),
            session_token: None,
        }
    }

    /// Blank tokens are treated as absent.
    pub fn set_application_token(&mut self, token: Option<String>) {
        self.application_token = token.and_then(RedactedToken::non_empty);
    }

    /// Blank tokens are treated as absent.
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token.and_then(RedactedToken::non_empty);
    }

    pub fn has_application_token(&self) -> bool {
        self.application_token.is_some()
    }

    pub fn has_session_token(&self) -> bool {
        self.session_token.is_some()
    }

    /// Drop both tokens.
    pub fn clear(&mut self) {
        self.application_token = None;
        self.session_token = None;
    }

    /// The credential a request made now would carry.
    pub fn credential(&self) -> Credential {
        if let Some(token) = &self.application_token {
            return Credential::ApplicationToken(token.clone());
        }

        if let Some(token) = &self.session_token {
            return Credential::SessionToken(token.clone());
        }

        Credential::None
    }

    /// Recomputed on every call since a login can land between two calls.
    pub fn authorization_header(&self) -> Option<String> {
        self.credential().authorization_header()
    }
}
