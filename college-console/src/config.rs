//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConsoleError;

/// Development endpoint of the college API.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Terminal admin console for students and courses
#[derive(Parser, Debug, Clone)]
#[command(name = "college-console")]
#[command(about = "Manage students and courses of a college REST API from the terminal")]
pub struct Cli {
    /// Base URL of the REST API
    #[arg(long, env = "COLLEGE_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Log file (defaults to the platform data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset, e.g. "debug" or "college_console=trace"
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Spinner animation interval in milliseconds
    #[arg(long, default_value = "120")]
    pub tick_ms: u64,
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub log_file: PathBuf,
    pub log_level: String,
    pub tick: Duration,
}

impl Cli {
    pub fn into_config(self) -> Result<Config, ConsoleError> {
        let url = reqwest::Url::parse(&self.api_base).map_err(|e| ConsoleError::ApiBase {
            url: self.api_base.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConsoleError::ApiBase {
                url: self.api_base,
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        Ok(Config {
            api_base: self.api_base.trim_end_matches('/').to_string(),
            log_file: self.log_file.unwrap_or_else(default_log_path),
            log_level: self.log_level,
            tick: Duration::from_millis(self.tick_ms.max(16)),
        })
    }
}

/// `<data dir>/college-console/console.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("college-console")
        .join("console.log")
}
