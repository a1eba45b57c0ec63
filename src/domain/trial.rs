//! Free-trial gate shared by every feature panel.

use chrono::{DateTime, Utc};

/// Whether the single free invocation has been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrialState {
    #[default]
    Available,
    Consumed { at: DateTime<Utc> },
}

impl TrialState {
    pub fn is_consumed(&self) -> bool {
        matches!(self, TrialState::Consumed { .. })
    }
}

/// Access rights handed to a panel by its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    pub trial: TrialState,
    /// Subscribers bypass the trial gate entirely.
    pub subscribed: bool,
}

impl Access {
    pub fn new(trial: TrialState, subscribed: bool) -> Self {
        Self { trial, subscribed }
    }

    /// Whether a feature invocation may proceed to the backend.
    pub fn admits(&self) -> bool {
        self.subscribed || !self.trial.is_consumed()
    }

    /// Record a successful invocation.
    ///
    /// Returns `true` only on the `Available -> Consumed` transition.
    pub fn consume(&mut self, now: DateTime<Utc>) -> bool {
        if self.subscribed || self.trial.is_consumed() {
            return false;
        }
        self.trial = TrialState::Consumed { at: now };
        true
    }
}
