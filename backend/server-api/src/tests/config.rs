use crate::config::{APPLICATION_TOKEN_ENV, CONFIG_FILE_NAME, ClientConfig};
use crate::error::ConfigError;

use models::Scheme;

use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

#[test]
fn given_missing_file_when_loaded_then_returns_defaults() {
    let dir = TempDir::new().unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.connection.port, crate::SERVER_DEFAULT_PORT);
    assert_eq!(config.transport.max_attempts, 3);
    assert_eq!(config.transport.base_delay_ms, 1000);
    assert_eq!(config.transport.timeout_secs, 30);
}

/// **VALUE**: Settings survive a save/load cycle through the atomic writer.
///
/// **BUG THIS CATCHES**: Would catch the temp file never being renamed, or
/// the application token being dropped on save.
#[test]
fn given_saved_config_when_loaded_then_values_survive_and_no_temp_file_left() {
    // GIVEN: A customized config
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.connection.host = "10.0.0.5".to_string();
    config.connection.port = 15777;
    config.connection.application_token = Some("ey.app.token".to_string());
    config.transport.max_attempts = 5;

    // WHEN: Saving and reloading
    config.save(dir.path()).unwrap();
    let loaded = ClientConfig::load(dir.path()).unwrap();

    // THEN: Same values, temp file gone
    assert_eq!(loaded, config);
    assert!(!dir.path().join(format!("{CONFIG_FILE_NAME}.tmp")).exists());
}

#[test]
fn given_partial_file_when_loaded_then_missing_fields_use_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{"connection":{"host":"game.example.net"}}"#,
    )
    .unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.connection.host, "game.example.net");
    assert_eq!(config.connection.port, crate::SERVER_DEFAULT_PORT);
    assert_eq!(config.version, 1);
}

/// **VALUE**: A corrupt file is reported, not silently replaced by defaults.
///
/// **BUG THIS CATCHES**: Would catch a typo in `client.json` sending admin
/// commands to `localhost` instead of failing loudly.
#[test]
fn given_corrupt_file_when_loaded_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    let error = ClientConfig::load(dir.path()).unwrap_err();

    assert!(matches!(error, ConfigError::ParseError { .. }));
}

#[test]
fn given_invalid_values_when_validated_then_rejected() {
    let mut config = ClientConfig::default();
    config.connection.host = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = ClientConfig::default();
    config.connection.port = 0;
    assert!(config.validate().is_err());

    let mut config = ClientConfig::default();
    config.transport.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = ClientConfig::default();
    config.transport.max_attempts = 11;
    assert!(config.validate().is_err());

    let mut config = ClientConfig::default();
    config.transport.max_attempts = 0;
    assert!(config.validate().is_err());
}

#[test]
fn given_invalid_config_when_saved_then_nothing_is_written() {
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.connection.port = 0;

    assert!(config.save(dir.path()).is_err());
    assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
}

#[test]
fn given_config_when_converted_then_endpoint_timeout_and_retry_match() {
    let mut config = ClientConfig::default();
    config.connection.host = "192.168.1.20".to_string();
    config.transport.timeout_secs = 5;
    config.transport.max_attempts = 4;
    config.transport.base_delay_ms = 250;

    let endpoint = config.endpoint().unwrap();
    let retry = config.retry_policy();

    assert_eq!(endpoint.scheme(), Scheme::Https);
    assert_eq!(
        endpoint.base_url().as_str(),
        "https://192.168.1.20:7777/api/v1"
    );
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(retry.max_attempts(), 4);
    assert_eq!(retry.base_delay(), Duration::from_millis(250));
}

#[test]
fn given_config_with_token_when_debug_formatted_then_token_is_hidden() {
    let mut config = ClientConfig::default();
    config.connection.application_token = Some("top-secret".to_string());

    assert!(!format!("{config:?}").contains("top-secret"));
}

/// **VALUE**: `SERVER_API_TOKEN` lets scripts supply a token without writing it to disk.
///
/// **BUG THIS CATCHES**: Would catch an empty variable wiping a configured token.
#[test]
#[serial]
fn given_env_token_when_overrides_applied_then_replaces_configured_token() {
    let mut config = ClientConfig::default();
    config.connection.application_token = Some("from-file".to_string());

    // SAFETY: serialized with every other test touching this variable
    unsafe { std::env::set_var(APPLICATION_TOKEN_ENV, "  from-env  ") };
    let applied = config.apply_env_overrides().unwrap();
    unsafe { std::env::remove_var(APPLICATION_TOKEN_ENV) };

    assert!(applied);
    assert_eq!(
        config.connection.application_token.as_deref(),
        Some("from-env")
    );
}

#[test]
#[serial]
fn given_blank_env_token_when_overrides_applied_then_config_unchanged() {
    let mut config = ClientConfig::default();
    config.connection.application_token = Some("from-file".to_string());

    // SAFETY: serialized with every other test touching this variable
    unsafe { std::env::set_var(APPLICATION_TOKEN_ENV, "   ") };
    let applied = config.apply_env_overrides().unwrap();
    unsafe { std::env::remove_var(APPLICATION_TOKEN_ENV) };

    assert!(!applied);
    assert_eq!(
        config.connection.application_token.as_deref(),
        Some("from-file")
    );
}
