//! copyforge: marketing copy generators backed by a generative model.
//!
//! Each feature turns a short form into one prompt, sends it to the backend
//! once, and coerces whatever comes back into the feature's result shape.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    FeatureDetail, FeatureSummary, InputInfo, RunOptions, RunResult, TrialStatus, describe,
    features, init, init_at, preview_prompt, render_result, run, run_at, trial_reset,
    trial_reset_at, trial_status, trial_status_at,
};
pub use domain::{AppError, ResultContract, TrialState, normalize_as};
