use crate::payloads::SettingsMap;

use serde::{Deserialize, Serialize};

pub const HEALTH_HEALTHY: &str = "healthy";
pub const HEALTH_SLOW: &str = "slow";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckRequest {
    pub client_custom_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// `"healthy"` or `"slow"`.
    pub health: String,
    #[serde(default)]
    pub server_custom_data: String,
}

impl HealthCheckResponse {
    pub fn is_healthy(&self) -> bool {
        self.health == HEALTH_HEALTHY
    }
}

/// Snapshot of the running game, as reported by `QueryServerState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerGameState {
    pub active_session_name: String,
    pub num_connected_players: i32,
    pub player_limit: i32,
    pub tech_tier: i32,
    pub active_schematic: String,
    pub game_phase: String,
    pub is_game_running: bool,
    pub total_game_duration: i64,
    pub is_game_paused: bool,
    pub average_tick_rate: f64,
    pub auto_load_session_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryServerStateResponse {
    pub server_game_state: ServerGameState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerOptionsResponse {
    pub server_options: SettingsMap,
    /// Options that take effect after the next restart.
    pub pending_server_options: SettingsMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyServerOptionsRequest {
    pub updated_server_options: SettingsMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedGameSettingsResponse {
    pub creative_mode_enabled: bool,
    pub advanced_game_settings: SettingsMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyAdvancedGameSettingsRequest {
    pub applied_advanced_game_settings: SettingsMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameServerRequest {
    pub server_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandRequest {
    pub command: String,
}

/// Reply to `RunCommand`.
///
/// `command_result` is the console output and `return_value` the logical
/// outcome. A command can execute and still report failure, so the two are
/// independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandResponse {
    #[serde(default)]
    pub command_result: String,
    pub return_value: bool,
}
