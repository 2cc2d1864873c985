//! Application configuration module
//!
//! `AppConfig` is the validated configuration the client runs with.
//! `FileConfig` is the optional on-disk TOML layer that feeds the builder.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Backend base URL used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000/api";

/// Per-request deadline used when nothing else is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL every API path is joined onto, without a trailing slash
    pub server_url: String,
    /// Deadline applied to requests that do not carry their own
    pub request_timeout: Duration,
    /// Explicit location of the persisted session/theme file
    pub state_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            state_file: None,
        }
    }
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Builder for AppConfig. Unset fields fall back to the defaults.
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    request_timeout: Option<Duration>,
    state_file: Option<PathBuf>,
}

impl AppConfigBuilder {
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    /// Apply every field present in a parsed config file
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(secs) = file.timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(path) = file.state_file {
            self.state_file = Some(path);
        }
        self
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let server_url = self
            .server_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.server_url);

        let config = AppConfig {
            server_url,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            state_file: self.state_file,
        };
        config.validate()?;
        Ok(config)
    }
}

/// On-disk configuration (`config.toml`). Every key is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub state_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file: {0}")]
    Io(String),
}
