use crate::payloads::SettingsMap;

use serde::{Deserialize, Serialize};

/// Body for `SaveGame`, `DeleteSaveFile` and `DownloadSaveGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNameRequest {
    pub save_name: String,
}

/// Body for `DeleteSaveSession` and `SetAutoLoadSessionName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNameRequest {
    pub session_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadGameRequest {
    pub save_name: String,
    pub enable_advanced_game_settings: bool,
}

/// JSON part of the multipart `UploadSaveGame` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSaveGameRequest {
    pub save_name: String,
    pub load_save_game: bool,
    pub enable_advanced_game_settings: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameData {
    pub session_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_location: Option<String>,
    #[serde(default)]
    pub skip_onboarding: bool,
    #[serde(default)]
    pub advanced_game_settings: SettingsMap,
    #[serde(default)]
    pub custom_options_only_for_modding: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewGameRequest {
    pub new_game_data: NewGameData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveHeader {
    pub save_version: i32,
    pub build_version: i32,
    pub save_name: String,
    pub map_name: String,
    pub map_options: String,
    pub session_name: String,
    pub play_duration_seconds: i64,
    pub save_date_time: String,
    pub is_modded_save: bool,
    pub is_edited_save: bool,
    pub is_creative_mode_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSaves {
    pub session_name: String,
    pub save_headers: Vec<SaveHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumerateSessionsResponse {
    pub sessions: Vec<SessionSaves>,
    /// Index into `sessions` of the session currently loaded, or -1.
    pub current_session_index: i32,
}

impl EnumerateSessionsResponse {
    pub fn current_session(&self) -> Option<&SessionSaves> {
        usize::try_from(self.current_session_index)
            .ok()
            .and_then(|index| self.sessions.get(index))
    }
}
