//! Typed wrappers, one per server function.
//!
//! Each wrapper is a thin layer over [`ApiClient::call`] and shares its error
//! semantics. Functions whose reply carries nothing useful return
//! [`Acknowledged`]; callers only observe success or failure.

use crate::client::ApiClient;
use crate::error::{ApiError, CallResult};

use models::{
    Acknowledged, AdvancedGameSettingsResponse, ApiFunction, ApplyAdvancedGameSettingsRequest,
    ApplyServerOptionsRequest, AuthenticationTokenResponse, ClaimServerRequest,
    CreateNewGameRequest, EnumerateSessionsResponse, HealthCheckRequest, HealthCheckResponse,
    LoadGameRequest, NewGameData, NoData, PasswordLoginRequest, PasswordlessLoginRequest,
    PrivilegeLevel, QueryServerStateResponse, RenameServerRequest, RunCommandRequest,
    RunCommandResponse, SaveNameRequest, ServerGameState, ServerOptionsResponse,
    SessionNameRequest, SetAdminPasswordRequest, SetClientPasswordRequest, SettingsMap,
    UploadSaveGameRequest,
};

use log::info;

impl ApiClient {
    // ============================================
    // HEALTH & AUTHENTICATION
    // ============================================

    pub async fn health_check(&self, client_custom_data: &str) -> CallResult<HealthCheckResponse> {
        let request = HealthCheckRequest {
            client_custom_data: client_custom_data.to_string(),
        };
        self.call(ApiFunction::HealthCheck, &request).await
    }

    /// Raw `PasswordlessLogin`. Does not store the token; see [`ApiClient::login`].
    pub async fn passwordless_login(
        &self,
        minimum_privilege_level: PrivilegeLevel,
    ) -> CallResult<AuthenticationTokenResponse> {
        let request = PasswordlessLoginRequest {
            minimum_privilege_level,
        };
        self.call(ApiFunction::PasswordlessLogin, &request).await
    }

    /// Raw `PasswordLogin`. Does not store the token; see [`ApiClient::login`].
    pub async fn password_login(
        &self,
        minimum_privilege_level: PrivilegeLevel,
        password: &str,
    ) -> CallResult<AuthenticationTokenResponse> {
        let request = PasswordLoginRequest {
            minimum_privilege_level,
            password: password.to_string(),
        };
        self.call(ApiFunction::PasswordLogin, &request).await
    }

    /// Succeeds when the server accepts the current credential. The server
    /// answers with no body; success itself is the signal.
    pub async fn verify_authentication_token(&self) -> CallResult<Acknowledged> {
        self.call(ApiFunction::VerifyAuthenticationToken, &NoData::default())
            .await
    }

    // ============================================
    // SERVER STATE & ADMINISTRATION
    // ============================================

    pub async fn query_server_state(&self) -> CallResult<ServerGameState> {
        let response: QueryServerStateResponse = self
            .call(ApiFunction::QueryServerState, &NoData::default())
            .await?;
        Ok(response.server_game_state)
    }

    /// Run a console command. The reply's output text and success flag are
    /// independent: a command can execute and still report failure.
    pub async fn run_command(&self, command: &str) -> CallResult<RunCommandResponse> {
        let request = RunCommandRequest {
            command: command.to_string(),
        };
        self.call(ApiFunction::RunCommand, &request).await
    }

    pub async fn shutdown(&self) -> CallResult<Acknowledged> {
        info!("Requesting server shutdown");
        self.call(ApiFunction::Shutdown, &NoData::default()).await
    }

    pub async fn get_server_options(&self) -> CallResult<ServerOptionsResponse> {
        self.call(ApiFunction::GetServerOptions, &NoData::default())
            .await
    }

    pub async fn apply_server_options(&self, options: SettingsMap) -> CallResult<Acknowledged> {
        let request = ApplyServerOptionsRequest {
            updated_server_options: options,
        };
        self.call(ApiFunction::ApplyServerOptions, &request).await
    }

    pub async fn get_advanced_game_settings(&self) -> CallResult<AdvancedGameSettingsResponse> {
        self.call(ApiFunction::GetAdvancedGameSettings, &NoData::default())
            .await
    }

    pub async fn apply_advanced_game_settings(
        &self,
        settings: SettingsMap,
    ) -> CallResult<Acknowledged> {
        let request = ApplyAdvancedGameSettingsRequest {
            applied_advanced_game_settings: settings,
        };
        self.call(ApiFunction::ApplyAdvancedGameSettings, &request)
            .await
    }

    /// Claim an unclaimed server. The returned admin token replaces the
    /// session token.
    pub async fn claim_server(
        &self,
        server_name: &str,
        admin_password: &str,
    ) -> CallResult<AuthenticationTokenResponse> {
        let request = ClaimServerRequest {
            server_name: server_name.to_string(),
            admin_password: admin_password.to_string(),
        };
        let response: AuthenticationTokenResponse =
            self.call(ApiFunction::ClaimServer, &request).await?;

        if response.authentication_token.trim().is_empty() {
            return Err(ApiError::decode("server returned an empty authentication token"));
        }

        self.set_session_token(Some(response.authentication_token.clone()));
        info!("Server claimed as '{server_name}'");
        Ok(response)
    }

    pub async fn rename_server(&self, server_name: &str) -> CallResult<Acknowledged> {
        let request = RenameServerRequest {
            server_name: server_name.to_string(),
        };
        self.call(ApiFunction::RenameServer, &request).await
    }

    pub async fn set_client_password(&self, password: &str) -> CallResult<Acknowledged> {
        let request = SetClientPasswordRequest {
            password: password.to_string(),
        };
        self.call(ApiFunction::SetClientPassword, &request).await
    }

    /// Change the admin password. The server invalidates every issued token
    /// except `authentication_token`, normally the caller's current token.
    pub async fn set_admin_password(
        &self,
        password: &str,
        authentication_token: &str,
    ) -> CallResult<Acknowledged> {
        let request = SetAdminPasswordRequest {
            password: password.to_string(),
            authentication_token: authentication_token.to_string(),
        };
        self.call(ApiFunction::SetAdminPassword, &request).await
    }

    pub async fn set_auto_load_session_name(&self, session_name: &str) -> CallResult<Acknowledged> {
        let request = SessionNameRequest {
            session_name: session_name.to_string(),
        };
        self.call(ApiFunction::SetAutoLoadSessionName, &request)
            .await
    }

    // ============================================
    // GAMES & SAVES
    // ============================================

    pub async fn create_new_game(&self, new_game_data: NewGameData) -> CallResult<Acknowledged> {
        let request = CreateNewGameRequest { new_game_data };
        self.call(ApiFunction::CreateNewGame, &request).await
    }

    pub async fn save_game(&self, save_name: &str) -> CallResult<Acknowledged> {
        self.call(ApiFunction::SaveGame, &save_name_request(save_name))
            .await
    }

    pub async fn load_game(
        &self,
        save_name: &str,
        enable_advanced_game_settings: bool,
    ) -> CallResult<Acknowledged> {
        let request = LoadGameRequest {
            save_name: save_name.to_string(),
            enable_advanced_game_settings,
        };
        self.call(ApiFunction::LoadGame, &request).await
    }

    pub async fn enumerate_sessions(&self) -> CallResult<EnumerateSessionsResponse> {
        self.call(ApiFunction::EnumerateSessions, &NoData::default())
            .await
    }

    pub async fn delete_save_file(&self, save_name: &str) -> CallResult<Acknowledged> {
        self.call(ApiFunction::DeleteSaveFile, &save_name_request(save_name))
            .await
    }

    pub async fn delete_save_session(&self, session_name: &str) -> CallResult<Acknowledged> {
        let request = SessionNameRequest {
            session_name: session_name.to_string(),
        };
        self.call(ApiFunction::DeleteSaveSession, &request).await
    }

    /// Upload a save file as multipart form data.
    pub async fn upload_save_game(
        &self,
        request: UploadSaveGameRequest,
        file: Vec<u8>,
    ) -> CallResult<Acknowledged> {
        let file_name = format!("{}.sav", request.save_name);
        info!("Uploading save '{}' ({} bytes)", request.save_name, file.len());
        self.call_multipart(ApiFunction::UploadSaveGame, &request, file_name, file)
            .await
    }

    /// Download a save file. The reply body is the file itself.
    pub async fn download_save_game(&self, save_name: &str) -> CallResult<Vec<u8>> {
        self.call_raw(ApiFunction::DownloadSaveGame, &save_name_request(save_name))
            .await
    }
}

fn save_name_request(save_name: &str) -> SaveNameRequest {
    SaveNameRequest {
        save_name: save_name.to_string(),
    }
}
