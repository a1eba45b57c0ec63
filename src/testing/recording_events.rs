use crate::app::panel::PanelEvents;
use crate::domain::TrialState;

#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub upgrade_requests: usize,
    pub trial_used: Vec<TrialState>,
}

impl PanelEvents for RecordingEvents {
    fn upgrade_requested(&mut self) {
        self.upgrade_requests += 1;
    }

    fn trial_used(&mut self, trial: TrialState) {
        self.trial_used.push(trial);
    }
}
