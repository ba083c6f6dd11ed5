//! Viewer configuration from command-line flags and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_OUTPUT: &str = "trilateration.svg";
pub const DEFAULT_CONTAINER_WIDTH: f64 = 900.0;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 2;

/// Errors produced while validating configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("container width must be a positive number, got {0}")]
    InvalidWidth(f64),

    #[error("{name} timeout must be greater than zero")]
    ZeroTimeout { name: &'static str },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "trilat-view", about = "Headless live view of scanner ranges and target estimate")]
pub struct Cli {
    /// Base URL of the estimation backend.
    #[arg(long, env = "TRILAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Poll interval in milliseconds.
    #[arg(long, env = "TRILAT_INTERVAL_MS", default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,

    /// SVG file rewritten after every applied snapshot.
    #[arg(long, env = "TRILAT_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Host container width in pixels; the canvas is this minus a fixed inset.
    #[arg(long, env = "TRILAT_WIDTH", default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub width: f64,

    #[arg(long, env = "TRILAT_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "TRILAT_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    /// Bearer token for the backend's API. Without it the state endpoint
    /// answers 401 unless the request carries a browser session.
    #[arg(long, env = "TRILAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    pub interval: Duration,
    pub output: PathBuf,
    pub container_width: f64,
    pub timeouts: Timeouts,
    /// API token; blank values are treated as absent.
    pub token: Option<String>,
}

impl ViewerConfig {
    /// Validate parsed flags into a typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-HTTP base URL, a zero interval or
    /// timeout, or a non-positive width.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let base_url = cli.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(cli.base_url));
        }
        if cli.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !(cli.width.is_finite() && cli.width > 0.0) {
            return Err(ConfigError::InvalidWidth(cli.width));
        }
        if cli.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout { name: "request" });
        }
        if cli.connect_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout { name: "connect" });
        }

        let token = cli.token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

        Ok(Self {
            base_url,
            interval: Duration::from_millis(cli.interval_ms),
            output: cli.output,
            container_width: cli.width,
            timeouts: Timeouts {
                request: Duration::from_secs(cli.request_timeout_secs),
                connect: Duration::from_secs(cli.connect_timeout_secs),
            },
            token,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
