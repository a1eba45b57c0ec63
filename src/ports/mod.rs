mod feature_catalog;
mod generative_backend;
mod trial_store;

pub use feature_catalog::FeatureCatalog;
pub use generative_backend::{GenerativeBackend, MockBackend};
pub use trial_store::TrialStore;
