//! Dual-output logging for the command-line tool.
//!
//! Colored records go to stderr so stdout stays clean for JSON results;
//! plain records are appended to `server-ctl.log` in the config directory.

use crate::error::CtlError;

use common::ErrorLocation;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "server-ctl.log";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Connection-pool chatter that drowns out call logs at debug level.
const QUIET_MODULES: [&str; 3] = ["hyper_util", "reqwest", "rustls"];

/// Initialize the logger once; later calls log a warning and return `Ok`.
///
/// # Errors
///
/// Returns [`CtlError::Ctl`] if the log file cannot be created or a global
/// logger was already installed by someone else.
pub fn initialize(log_dir: &Path, level: LevelFilter) -> Result<(), CtlError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, level);
        if result.is_ok() {
            info!("Logger initialized with level: {level:?}");
        }
    });

    result
}

#[track_caller]
pub(crate) fn initialize_internal(log_dir: &Path, level: LevelFilter) -> Result<(), CtlError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let base_dispatch = QUIET_MODULES
        .iter()
        .fold(Dispatch::new().level(level), |dispatch, module| {
            dispatch.level_for(*module, LevelFilter::Warn)
        });

    let stderr_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
            ))
        })
        .chain(stderr());

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                target = record.target(),
            ))
        })
        .chain(
            fern::log_file(&log_file_path).map_err(|e| CtlError::Ctl {
                message: format!("Failed to create log file: {e}"),
                location: ErrorLocation::caller(),
            })?,
        );

    base_dispatch
        .chain(stderr_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| CtlError::Ctl {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::caller(),
        })?;

    Ok(())
}
