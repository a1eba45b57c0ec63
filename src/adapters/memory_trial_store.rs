use std::sync::{Arc, Mutex};

use crate::domain::{AppError, TrialState};
use crate::ports::TrialStore;

/// In-memory trial store for tests and embedding.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrialStore {
    state: Arc<Mutex<TrialState>>,
}

impl MemoryTrialStore {
    pub fn new(state: TrialState) -> Self {
        Self { state: Arc::new(Mutex::new(state)) }
    }
}

impl TrialStore for MemoryTrialStore {
    fn load(&self) -> Result<TrialState, AppError> {
        let state = self
            .state
            .lock()
            .map_err(|_| AppError::config_error("Trial state lock poisoned"))?;
        Ok(*state)
    }

    fn save(&self, state: &TrialState) -> Result<(), AppError> {
        let mut current = self
            .state
            .lock()
            .map_err(|_| AppError::config_error("Trial state lock poisoned"))?;
        *current = *state;
        Ok(())
    }
}
