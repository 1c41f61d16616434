// Unit tests for logger initialization

use crate::logger::{LOG_FILE_NAME, initialize, initialize_internal};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Calling `initialize()` twice neither panics nor fails.
///
/// **BUG THIS CATCHES**: Would catch the Once/AtomicBool guards being removed,
/// which makes fern fail when a second global logger is installed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable directory
    let dir = TempDir::new().unwrap();

    // WHEN: Calling initialize twice
    let first = initialize(dir.path(), LevelFilter::Debug);
    let second = initialize(dir.path(), LevelFilter::Debug);

    // THEN: Both succeed and the log file exists
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
    assert!(dir.path().join(LOG_FILE_NAME).exists());
}

/// **VALUE**: An unwritable log directory is a clear error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_invalid_log_dir_when_initialized_then_returns_ctl_error() {
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    let result = initialize_internal(&invalid_dir, LevelFilter::Info);

    let err = result.unwrap_err();
    assert!(
        format!("{err:?}").contains("Ctl"),
        "Error should be CtlError::Ctl"
    );
}
