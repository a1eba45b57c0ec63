//! Free-trial state persisted in `.copyforge/state.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::config::paths;
use crate::domain::{AppError, TrialState};
use crate::ports::TrialStore;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StateFile {
    #[serde(default)]
    trial: TrialSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrialSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    consumed_at: Option<DateTime<Utc>>,
}

/// Trial store backed by a TOML file under the project root.
#[derive(Debug, Clone)]
pub struct FilesystemTrialStore {
    path: PathBuf,
}

impl FilesystemTrialStore {
    pub fn new(root: &Path) -> Self {
        Self { path: paths::state(root) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrialStore for FilesystemTrialStore {
    fn load(&self) -> Result<TrialState, AppError> {
        if !self.path.exists() {
            return Ok(TrialState::Available);
        }

        let content = fs::read_to_string(&self.path)?;
        let state: StateFile = toml::from_str(&content)?;
        Ok(match state.trial.consumed_at {
            Some(at) => TrialState::Consumed { at },
            None => TrialState::Available,
        })
    }

    fn save(&self, state: &TrialState) -> Result<(), AppError> {
        let consumed_at = match state {
            TrialState::Available => None,
            TrialState::Consumed { at } => Some(*at),
        };
        let content = toml::to_string_pretty(&StateFile { trial: TrialSection { consumed_at } })
            .map_err(|e| AppError::config_error(format!("Failed to serialize trial state: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}
