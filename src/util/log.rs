// src/util/log.rs

//! Logger Utility - file-based tracing output for the TUI (stdout belongs to the terminal)
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{ChatError, Result};

pub const LOG_FILE_NAME: &str = "chat.log";

/// Installs the global subscriber writing to `<log_dir>/chat.log`.
///
/// The file is truncated on every start. `RUST_LOG` wins over the
/// `debug` switch when it is set.
pub fn init(log_dir: &str, debug: bool) -> Result<PathBuf> {
    let log_dir = Path::new(log_dir);
    create_dir_all(log_dir)?;

    let path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| ChatError::ConfigError(format!("logger already initialized: {}", e)))?;

    Ok(path)
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        ::tracing::error!($($arg)*);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        ::tracing::warn!($($arg)*);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        ::tracing::info!($($arg)*);
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        ::tracing::debug!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let path = init(log_dir.to_str().unwrap(), true).expect("Failed to create logger");
        crate::log_info!("Test info");

        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        assert!(path.exists());

        // A second subscriber cannot be installed.
        assert!(init(log_dir.to_str().unwrap(), false).is_err());
    }
}
