//! Caller-level login built from the two primitive login functions.
//!
//! Administrator privilege is requested first and Client privilege second,
//! so the session ends up with the highest privilege the password allows.
//! A configured application token makes login unnecessary.

use crate::client::ApiClient;
use crate::error::{ApiError, CallResult};

use models::PrivilegeLevel;

use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// An application token is configured; no login call was made.
    ApplicationToken,
    /// A session token was obtained at this privilege level.
    Session { privilege: PrivilegeLevel },
}

impl ApiClient {
    /// Log in and keep the returned token as the session token.
    ///
    /// Uses `PasswordLogin` when `password` is given and `PasswordlessLogin`
    /// otherwise. Cancellation and disposal stop the sequence immediately;
    /// any other Administrator failure falls back to Client.
    pub async fn login(&self, password: Option<&str>) -> CallResult<LoginOutcome> {
        if self.has_application_token() {
            info!("Application token configured, skipping login");
            return Ok(LoginOutcome::ApplicationToken);
        }

        match self.login_as(PrivilegeLevel::Administrator, password).await {
            Ok(outcome) => return Ok(outcome),
            Err(e) if e.is_cancelled() || e.is_disposed() => return Err(e),
            Err(e) => debug!(
                "Administrator login failed [{}], falling back to Client",
                e.error_category()
            ),
        }

        self.login_as(PrivilegeLevel::Client, password).await
    }

    /// Forget every credential, application token included.
    pub fn disconnect(&self) {
        self.with_auth(|auth| auth.clear());
        info!("Credentials cleared");
    }

    async fn login_as(
        &self,
        privilege: PrivilegeLevel,
        password: Option<&str>,
    ) -> CallResult<LoginOutcome> {
        let response = match password {
            Some(password) => self.password_login(privilege, password).await?,
            None => self.passwordless_login(privilege).await?,
        };

        if response.authentication_token.trim().is_empty() {
            return Err(ApiError::decode("server returned an empty authentication token"));
        }

        self.set_session_token(Some(response.authentication_token));
        info!("Logged in with {privilege:?} privilege");

        Ok(LoginOutcome::Session { privilege })
    }
}
