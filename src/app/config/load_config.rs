//! Configuration loading from `.copyforge/config.toml`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::config::{self, paths};
use crate::domain::{AppConfig, AppError};

/// Load and validate the configuration under `root`.
///
/// A project without `.copyforge/config.toml` runs on defaults.
pub fn load_config(root: &Path) -> Result<AppConfig, AppError> {
    let config_path = paths::config(root);
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file; using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&config_path)?;
    config::parse_config_content(&content)
}
