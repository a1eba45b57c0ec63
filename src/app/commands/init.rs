use std::fs;
use std::path::Path;

use crate::domain::config::{self, paths};
use crate::domain::{AppConfig, AppError};

/// Execute the init command.
///
/// Writes `.copyforge/config.toml` with every default spelled out.
pub fn execute(root: &Path) -> Result<(), AppError> {
    let dir = paths::copyforge_dir(root);
    if dir.exists() {
        return Err(AppError::WorkspaceExists);
    }

    let content = config::render_config(&AppConfig::default())?;
    fs::create_dir_all(&dir)?;
    fs::write(paths::config(root), content)?;
    Ok(())
}
