use crate::domain::AppConfig;
use crate::ports::{FeatureCatalog, TrialStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<C: FeatureCatalog, S: TrialStore> {
    catalog: C,
    trial_store: S,
    config: AppConfig,
}

impl<C: FeatureCatalog, S: TrialStore> AppContext<C, S> {
    /// Create a new application context.
    pub fn new(catalog: C, trial_store: S, config: AppConfig) -> Self {
        Self { catalog, trial_store, config }
    }

    /// Get a reference to the feature catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get a reference to the trial store.
    pub fn trial_store(&self) -> &S {
        &self.trial_store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
