//! Trial status and reset.

use crate::domain::{Access, AppError, TrialState};
use crate::ports::TrialStore;

/// Trial state as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialStatus {
    pub trial: TrialState,
    pub subscribed: bool,
}

impl TrialStatus {
    /// Whether the next run would reach the backend.
    pub fn can_run(&self) -> bool {
        Access::new(self.trial, self.subscribed).admits()
    }
}

pub fn status<S: TrialStore>(store: &S, subscribed: bool) -> Result<TrialStatus, AppError> {
    Ok(TrialStatus { trial: store.load()?, subscribed })
}

/// Make the free trial available again.
pub fn reset<S: TrialStore>(store: &S) -> Result<(), AppError> {
    store.save(&TrialState::Available)
}
