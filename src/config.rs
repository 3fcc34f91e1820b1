//! Client configuration loaded from a TOML file and environment variables.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "contrackt.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:8000/api`.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"warn"` or `"contrackt_lib=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// The configured backend URL, or an error if none was given.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("CONTRACKT_API_URL not defined")]
    MissingBaseUrl,
}

/// Loads configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] if it exists.
///
/// Environment variable overrides:
/// - `CONTRACKT_API_URL` overrides `api.base_url`
/// - `CONTRACKT_LOG_LEVEL` overrides `logging.level`
/// - `CONTRACKT_LOG_JSON` overrides `logging.json` ("true" or "1")
///
/// # Errors
///
/// Returns `ConfigError` if an explicitly named file is missing, or if any
/// file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                parse_file(default)?
            } else {
                Config::default()
            }
        }
    };
    Ok(apply_overrides(config, |key| std::env::var(key).ok()))
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(url) = var("CONTRACKT_API_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = Some(url);
    }
    if let Some(level) = var("CONTRACKT_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
        config.logging.level = level;
    }
    if let Some(json) = var("CONTRACKT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    config
}
