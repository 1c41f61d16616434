use std::fmt::{Display, Formatter, Result as FormatResult};

/// Every function the server exposes on its single `/api/v1` endpoint.
///
/// The server dispatches on the `function` field of the request envelope and
/// matches names case-sensitively, so [`ApiFunction::as_str`] is the only
/// source of the wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFunction {
    HealthCheck,
    PasswordlessLogin,
    PasswordLogin,
    VerifyAuthenticationToken,
    QueryServerState,
    RunCommand,
    Shutdown,
    SaveGame,
    LoadGame,
    EnumerateSessions,
    GetServerOptions,
    GetAdvancedGameSettings,
    ApplyAdvancedGameSettings,
    ClaimServer,
    RenameServer,
    SetClientPassword,
    SetAdminPassword,
    SetAutoLoadSessionName,
    ApplyServerOptions,
    CreateNewGame,
    DeleteSaveFile,
    DeleteSaveSession,
    UploadSaveGame,
    DownloadSaveGame,
}

impl ApiFunction {
    pub const ALL: [ApiFunction; 24] = [
        ApiFunction::HealthCheck,
        ApiFunction::PasswordlessLogin,
        ApiFunction::PasswordLogin,
        ApiFunction::VerifyAuthenticationToken,
        ApiFunction::QueryServerState,
        ApiFunction::RunCommand,
        ApiFunction::Shutdown,
        ApiFunction::SaveGame,
        ApiFunction::LoadGame,
        ApiFunction::EnumerateSessions,
        ApiFunction::GetServerOptions,
        ApiFunction::GetAdvancedGameSettings,
        ApiFunction::ApplyAdvancedGameSettings,
        ApiFunction::ClaimServer,
        ApiFunction::RenameServer,
        ApiFunction::SetClientPassword,
        ApiFunction::SetAdminPassword,
        ApiFunction::SetAutoLoadSessionName,
        ApiFunction::ApplyServerOptions,
        ApiFunction::CreateNewGame,
        ApiFunction::DeleteSaveFile,
        ApiFunction::DeleteSaveSession,
        ApiFunction::UploadSaveGame,
        ApiFunction::DownloadSaveGame,
    ];

    /// Wire name sent in the envelope's `function` field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApiFunction::HealthCheck => "HealthCheck",
            ApiFunction::PasswordlessLogin => "PasswordlessLogin",
            ApiFunction::PasswordLogin => "PasswordLogin",
            ApiFunction::VerifyAuthenticationToken => "VerifyAuthenticationToken",
            ApiFunction::QueryServerState => "QueryServerState",
            ApiFunction::RunCommand => "RunCommand",
            ApiFunction::Shutdown => "Shutdown",
            ApiFunction::SaveGame => "SaveGame",
            ApiFunction::LoadGame => "LoadGame",
            ApiFunction::EnumerateSessions => "EnumerateSessions",
            ApiFunction::GetServerOptions => "GetServerOptions",
            ApiFunction::GetAdvancedGameSettings => "GetAdvancedGameSettings",
            ApiFunction::ApplyAdvancedGameSettings => "ApplyAdvancedGameSettings",
            ApiFunction::ClaimServer => "ClaimServer",
            ApiFunction::RenameServer => "RenameServer",
            ApiFunction::SetClientPassword => "SetClientPassword",
            ApiFunction::SetAdminPassword => "SetAdminPassword",
            ApiFunction::SetAutoLoadSessionName => "SetAutoLoadSessionName",
            ApiFunction::ApplyServerOptions => "ApplyServerOptions",
            ApiFunction::CreateNewGame => "CreateNewGame",
            ApiFunction::DeleteSaveFile => "DeleteSaveFile",
            ApiFunction::DeleteSaveSession => "DeleteSaveSession",
            ApiFunction::UploadSaveGame => "UploadSaveGame",
            ApiFunction::DownloadSaveGame => "DownloadSaveGame",
        }
    }
}

impl Display for ApiFunction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}
