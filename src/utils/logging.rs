//! Logging system initialization.
//!
//! Sets up tracing-based logging with file output to
//! `$GESTURE_SETTINGS_HOME/gesture-settings.log` and rotation on startup
//! keeping a bounded history of previous sessions.

use crate::error::{GestureSettingsError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep
const MAX_LOG_FILES: u8 = 5;

/// Directory for the log file: `$GESTURE_SETTINGS_HOME`, falling back to the
/// current directory.
pub fn log_dir() -> PathBuf {
    let home = std::env::var("GESTURE_SETTINGS_HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

/// Initialize the logging system.
///
/// Log level defaults to INFO but can be configured via the `RUST_LOG`
/// environment variable. Rotates existing logs on startup so each session's
/// logs are preserved separately.
pub fn init_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("gesture-settings.log");
    rotate_logs_on_startup(&log_path)?;

    // Rotation is handled manually on startup, so the appender never rotates
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("gesture-settings")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| GestureSettingsError::LoggingError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GestureSettingsError::LoggingError(Box::new(e)))?;

    tracing::info!("gesture-settings v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on startup.
///
/// The oldest file is deleted, every numbered file shifts up by one, and the
/// current log becomes `.1`. A fresh log file is created by the appender.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        GestureSettingsError::LoggingError(StringError::new("Invalid log path"))
    })?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| GestureSettingsError::LoggingError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));
        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    let log_1 = log_dir.join(format!("{log_name}.1"));
    std::fs::rename(log_path, &log_1)?;

    Ok(())
}
