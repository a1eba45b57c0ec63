//! Application configuration loaded from `.copyforge/config.toml`.

pub mod paths;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Environment variable holding the generative backend API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Generative backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Access and upgrade configuration.
    #[serde(default)]
    pub access: AccessConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.backend.validate()?;
        Ok(())
    }
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL; `models/{model}:generateContent` is resolved against it.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), model: default_model(), timeout_secs: default_timeout() }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(AppError::InvalidConfig(format!(
                "api_url '{}' cannot be used as a base URL",
                self.api_url
            )));
        }
        Ok(())
    }
}

/// Trial and subscription configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Subscribers are never gated by the free trial.
    #[serde(default)]
    pub subscribed: bool,
    /// Where users are sent once the trial is spent.
    #[serde(default = "default_upgrade_url")]
    pub upgrade_url: Url,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self { subscribed: false, upgrade_url: default_upgrade_url() }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("Default API URL must be valid")
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_upgrade_url() -> Url {
    Url::parse("https://copyforge.app/upgrade").expect("Default upgrade URL must be valid")
}

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Render a configuration as TOML for writing to disk.
pub fn render_config(config: &AppConfig) -> Result<String, AppError> {
    toml::to_string_pretty(config)
        .map_err(|e| AppError::config_error(format!("Failed to serialize config: {}", e)))
}
