//! Client configuration persisted as `client.json`.
//!
//! A missing file yields defaults; a present but corrupt or invalid file is
//! an error so a typo never silently points the client at the wrong server.

pub mod env;

pub use env::{APPLICATION_TOKEN_ENV, CONFIG_DIR_NAME, default_config_dir, load_dotenv};

use crate::SERVER_DEFAULT_PORT;
use crate::error::config::ConfigError;
use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use crate::transport::DEFAULT_TIMEOUT_DURATION;

use common::ErrorLocation;
use models::{Endpoint, EndpointBuilder, ModelError};

use std::fmt;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "client.json";
const CONFIG_VERSION: u32 = 1;
const DEFAULT_HOST: &str = "localhost";
const MAX_ATTEMPTS_LIMIT: u32 = 10;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Long-lived token generated on the server console. Takes precedence
    /// over any session token obtained by logging in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_token: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            application_token: None,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "application_token",
                &self.application_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            connection: ConnectionConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    SERVER_DEFAULT_PORT
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_DURATION.as_secs()
}
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load config from `{config_dir}/client.json`.
    ///
    /// # Returns
    ///
    /// Defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the file exists but cannot be read, parsed or validated.
    #[track_caller]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::ReadError {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {e}");
            ConfigError::ParseError {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/client.json` through a temp file and rename.
    #[track_caller]
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::caller(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::caller(),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::ValidationError`] naming the first invalid value.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::ValidationError {
            location: ErrorLocation::caller(),
            reason,
        };

        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(invalid(format!(
                "Invalid version: {} (expected 1-{CONFIG_VERSION})",
                self.version
            )));
        }

        if self.connection.host.trim().is_empty() {
            return Err(invalid("connection.host cannot be empty".to_string()));
        }

        if self.connection.port == 0 {
            return Err(invalid("connection.port cannot be 0".to_string()));
        }

        if self.transport.timeout_secs == 0 {
            return Err(invalid(
                "transport.timeout_secs must be at least 1".to_string(),
            ));
        }

        if !(1..=MAX_ATTEMPTS_LIMIT).contains(&self.transport.max_attempts) {
            return Err(invalid(format!(
                "transport.max_attempts: {} (must be 1-{MAX_ATTEMPTS_LIMIT})",
                self.transport.max_attempts
            )));
        }

        Ok(())
    }

    /// Override the application token from `SERVER_API_TOKEN` when it is set
    /// and non-blank.
    ///
    /// # Returns
    ///
    /// `true` when the override was applied.
    #[track_caller]
    pub fn apply_env_overrides(&mut self) -> Result<bool, ConfigError> {
        match env::application_token_from_env()? {
            Some(token) => {
                info!("Application token taken from {APPLICATION_TOKEN_ENV}");
                self.connection.application_token = Some(token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[track_caller]
    pub fn endpoint(&self) -> Result<Endpoint, ModelError> {
        EndpointBuilder::default()
            .with_host(&self.connection.host)
            .with_port(self.connection.port)
            .build()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.transport.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.transport.max_attempts,
            Duration::from_millis(self.transport.base_delay_ms),
        )
    }
}
