use crate::constants::{DEFAULT_API_DOMAIN, DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
///
/// Read from a TOML file and environment variables; never written back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Results API domain. A missing scheme is read as https.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Path to the log file. No file logging when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

/// Adds the https scheme to bare domains and drops trailing slashes.
fn normalize_api_domain(api_domain: &str) -> String {
    let trimmed = api_domain.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") || trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    ///
    /// See [`Config::load_with_overrides`].
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads configuration from `path`, applies environment overrides and validates it.
    ///
    /// # Environment Variables
    /// - `MATCHDAY_API_DOMAIN` - Override API domain
    /// - `MATCHDAY_LOG_FILE` - Override log file path
    /// - `MATCHDAY_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Loaded configuration, defaults when the file does not exist
    /// * `Err(AppError)` - Unreadable or invalid file, or invalid final values
    pub async fn load_with_overrides(path: &Path) -> Result<Self, AppError> {
        let mut config = if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load_from_path(path).await?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides();
        config.api_domain = normalize_api_domain(&config.api_domain);
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a file without overrides or validation.
    pub async fn load_from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_domain,
            self.http_timeout_seconds,
            self.log_file_path.as_deref(),
        )
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> PathBuf {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> PathBuf {
        paths::get_log_dir_path()
    }

    /// Human-readable summary of the effective settings.
    ///
    /// # Arguments
    /// * `config_path` - The file the settings were loaded from
    pub fn describe(&self, config_path: &Path) -> String {
        let separator = "────────────────────────────────────";
        let mut out = String::new();
        let _ = writeln!(out, "Current Configuration");
        let _ = writeln!(out, "{separator}");
        let _ = writeln!(out, "Config Location:");
        if config_path.exists() {
            let _ = writeln!(out, "{}", config_path.display());
        } else {
            let _ = writeln!(out, "{} (not found, using defaults)", config_path.display());
        }
        let _ = writeln!(out, "{separator}");
        let _ = writeln!(out, "API Domain:");
        let _ = writeln!(out, "{}", self.api_domain);
        let _ = writeln!(out, "{separator}");
        let _ = writeln!(out, "HTTP Timeout:");
        let _ = writeln!(out, "{} seconds", self.http_timeout_seconds);
        let _ = writeln!(out, "{separator}");
        let _ = writeln!(out, "Log File Location:");
        match &self.log_file_path {
            Some(custom_path) => {
                let _ = writeln!(out, "{custom_path}");
            }
            None => {
                let _ = writeln!(out, "(stderr only, default directory {})", get_log_dir_path().display());
            }
        }
        out
    }
}
