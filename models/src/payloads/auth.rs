use serde::{Deserialize, Serialize};

/// Privilege levels the server grants through login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegeLevel {
    NotAuthenticated,
    Client,
    Administrator,
    InitialAdmin,
    #[serde(rename = "APIToken")]
    ApiToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordlessLoginRequest {
    pub minimum_privilege_level: PrivilegeLevel,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordLoginRequest {
    pub minimum_privilege_level: PrivilegeLevel,
    pub password: String,
}

impl std::fmt::Debug for PasswordLoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordLoginRequest")
            .field("minimum_privilege_level", &self.minimum_privilege_level)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Reply to `PasswordLogin`, `PasswordlessLogin` and `ClaimServer`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationTokenResponse {
    pub authentication_token: String,
}

impl std::fmt::Debug for AuthenticationTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationTokenResponse")
            .field("authentication_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimServerRequest {
    pub server_name: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetClientPasswordRequest {
    pub password: String,
}

/// `authenticationToken` is the admin token the caller keeps using once the
/// password change invalidates every previously issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminPasswordRequest {
    pub password: String,
    pub authentication_token: String,
}
