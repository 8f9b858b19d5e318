//! Log file setup
//!
//! The terminal belongs to the UI, so events go to a file. `RUST_LOG` wins
//! over the configured level when set.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ConsoleError;

/// Install the global `fmt` subscriber writing to `config.log_file`.
pub fn init(config: &Config) -> Result<(), ConsoleError> {
    let path = &config.log_file;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| ConsoleError::LogFile {
            path: path.clone(),
            source,
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConsoleError::LogFile {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ConsoleError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| ConsoleError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
