//! Environment and filesystem locations for the client configuration.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env::VarError;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Overrides `connection.application_token` when set and non-blank.
pub const APPLICATION_TOKEN_ENV: &str = "SERVER_API_TOKEN";
pub const CONFIG_DIR_NAME: &str = "server-ctl";

/// `{platform config dir}/server-ctl`, e.g. `~/.config/server-ctl` on Linux.
#[track_caller]
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| ConfigError::Environment {
            location: ErrorLocation::caller(),
            variable: "config_dir".to_string(),
            reason: "platform has no configuration directory".to_string(),
        })
}

/// Load `.env` from the working directory, then from next to the executable.
///
/// # Returns
///
/// The file that was loaded, if any. A missing `.env` is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from {}", path.display());
        return Some(path);
    }

    let env_path = std::env::current_exe()
        .ok()?
        .parent()?
        .join(".env");

    if !env_path.exists() {
        debug!("No .env file found");
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from {}", env_path.display());
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {}: {e}", env_path.display());
            None
        }
    }
}

#[track_caller]
pub(crate) fn application_token_from_env() -> Result<Option<String>, ConfigError> {
    match std::env::var(APPLICATION_TOKEN_ENV) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::Environment {
            location: ErrorLocation::caller(),
            variable: APPLICATION_TOKEN_ENV.to_string(),
            reason: "value is not valid unicode".to_string(),
        }),
    }
}
