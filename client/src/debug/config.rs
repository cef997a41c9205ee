//! Logging configuration from environment variables

use std::env;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "nuru-client.log";
pub const DEFAULT_FILTER: &str = "nuru_client=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory holding the daily-rotated log files
    pub log_dir: PathBuf,
    /// Filter directive (e.g., "nuru_client=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_FILTER.to_string(),
            stderr: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from `NURU_LOG_DIR`, `RUST_LOG` and `NURU_LOG_STDERR`
    pub fn from_env() -> Self {
        Self {
            log_dir: env::var("NURU_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
            stderr: env::var("NURU_LOG_STDERR")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
