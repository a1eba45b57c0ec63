use crate::domain::{AppError, TrialState};

/// Port for persisting the free-trial state between invocations.
pub trait TrialStore {
    fn load(&self) -> Result<TrialState, AppError>;

    fn save(&self, state: &TrialState) -> Result<(), AppError>;
}
