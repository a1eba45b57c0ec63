use std::path::{Path, PathBuf};

/// Name of the per-project state directory.
pub const COPYFORGE_DIR: &str = ".copyforge";

/// `.copyforge/`
pub fn copyforge_dir(root: &Path) -> PathBuf {
    root.join(COPYFORGE_DIR)
}

/// `.copyforge/config.toml`
pub fn config(root: &Path) -> PathBuf {
    copyforge_dir(root).join("config.toml")
}

/// `.copyforge/state.toml`
pub fn state(root: &Path) -> PathBuf {
    copyforge_dir(root).join("state.toml")
}
