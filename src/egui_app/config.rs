//! Client Configuration
//!
//! Resolves the [`AppConfig`] the app runs with from three layers, lowest
//! precedence first: built-in defaults, `<config_dir>/notekeeper/config.toml`,
//! and environment variables (`NOTES_API_URL`, `NOTES_TIMEOUT_SECS`,
//! `NOTES_STATE_FILE`).

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

pub const ENV_API_URL: &str = "NOTES_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "NOTES_TIMEOUT_SECS";
pub const ENV_STATE_FILE: &str = "NOTES_STATE_FILE";

const APP_DIR: &str = "notekeeper";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "session.json";

/// Application configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Load from the default config file location and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file_text = read_config_file()?;
        Self::from_sources(file_text.as_deref(), |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`] but never fails. An unusable config file is
    /// skipped and the environment is applied to the defaults instead.
    pub fn load_or_default() -> Self {
        Self::resolve(read_config_file(), |key| std::env::var(key).ok())
    }

    fn resolve<F>(file_text: Result<Option<String>, ConfigError>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let layered = file_text.and_then(|text| Self::from_sources(text.as_deref(), &env));
        layered.unwrap_or_else(|e| {
            warn!(error = %e, "ignoring config file");
            Self::from_sources(None, &env).unwrap_or_else(|e| {
                warn!(error = %e, "invalid environment overrides, using defaults");
                Self::new()
            })
        })
    }

    /// Resolve configuration from an optional TOML document and an env lookup
    pub fn from_sources<F>(file_text: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(text) = file_text {
            builder = builder.merge_file(FileConfig::parse(text)?);
        }

        if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            builder = builder.server_url(url);
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(path) = env(ENV_STATE_FILE).filter(|v| !v.trim().is_empty()) {
            builder = builder.state_file(path);
        }

        Self::with_builder(builder)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url(), path)
        } else {
            format!("{}/{}", self.server_url(), path)
        }
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout
    }

    /// Where the session store keeps its file
    pub fn state_file(&self) -> PathBuf {
        self.app
            .state_file
            .clone()
            .unwrap_or_else(|| app_dir(dirs::config_dir()).join(STATE_FILE))
    }
}

fn read_config_file() -> Result<Option<String>, ConfigError> {
    match default_config_path() {
        Some(path) if path.exists() => std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e))),
        _ => Ok(None),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir).join(APP_DIR)
}
