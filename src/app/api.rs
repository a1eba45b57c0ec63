//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution. Every operation has a `*_at` variant taking an
//! explicit project root; the plain form uses the current directory.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::adapters::{EmbeddedFeatureCatalog, FilesystemTrialStore};
use crate::app::config::load_config;
use crate::app::render::render_cards;
use crate::app::{
    AppContext,
    commands::{features, init, preview, run, trial},
};
use crate::ports::FeatureCatalog;

pub use crate::app::commands::features::{FeatureDetail, FeatureSummary, InputInfo};
pub use crate::app::commands::run::{RunOptions, RunResult};
pub use crate::app::commands::trial::TrialStatus;
pub use crate::domain::AppError;

/// Create an `AppContext` for a given project root.
fn create_context(
    root: &Path,
) -> Result<AppContext<EmbeddedFeatureCatalog, FilesystemTrialStore>, AppError> {
    let config = load_config(root)?;
    let catalog = EmbeddedFeatureCatalog::load()?;
    let trial_store = FilesystemTrialStore::new(root);
    Ok(AppContext::new(catalog, trial_store, config))
}

// =============================================================================
// Init Command API
// =============================================================================

/// Create `.copyforge/config.toml` with defaults in the current directory.
pub fn init() -> Result<(), AppError> {
    init_at(std::env::current_dir()?)
}

/// Create `.copyforge/config.toml` with defaults at the specified path.
pub fn init_at(root: impl Into<PathBuf>) -> Result<(), AppError> {
    let root: PathBuf = root.into();
    init::execute(&root)
}

// =============================================================================
// Feature Catalog API
// =============================================================================

/// List all available features.
pub fn features() -> Result<Vec<FeatureSummary>, AppError> {
    let catalog = EmbeddedFeatureCatalog::load()?;
    Ok(features::list(&catalog))
}

/// Get the inputs and result shape of a feature.
pub fn describe(id: &str) -> Result<FeatureDetail, AppError> {
    let catalog = EmbeddedFeatureCatalog::load()?;
    features::describe(&catalog, id)
}

/// Assemble the prompt a run would send. No backend call, no trial check.
pub fn preview_prompt<I, K, V>(id: &str, inputs: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let catalog = EmbeddedFeatureCatalog::load()?;
    preview::execute(&catalog, id, inputs)
}

/// Render a run result as text cards in the feature's field order.
pub fn render_result(id: &str, value: &Value) -> Result<String, AppError> {
    let catalog = EmbeddedFeatureCatalog::load()?;
    let feature = catalog.require(id)?;
    Ok(render_cards(feature.contract(), value))
}

// =============================================================================
// Run Command API
// =============================================================================

/// Run a feature in the current directory.
pub fn run(options: RunOptions) -> Result<RunResult, AppError> {
    run_at(options, std::env::current_dir()?)
}

/// Run a feature against the project at `root`.
///
/// The trial state lives in `<root>/.copyforge/state.toml`.
pub fn run_at(options: RunOptions, root: impl Into<PathBuf>) -> Result<RunResult, AppError> {
    let root: PathBuf = root.into();
    let ctx = create_context(&root)?;
    run::execute(&ctx, options)
}

// =============================================================================
// Trial API
// =============================================================================

/// Report whether the free trial is still available.
pub fn trial_status() -> Result<TrialStatus, AppError> {
    trial_status_at(std::env::current_dir()?)
}

pub fn trial_status_at(root: impl Into<PathBuf>) -> Result<TrialStatus, AppError> {
    let root: PathBuf = root.into();
    let config = load_config(&root)?;
    trial::status(&FilesystemTrialStore::new(&root), config.access.subscribed)
}

/// Make the free trial available again.
pub fn trial_reset() -> Result<(), AppError> {
    trial_reset_at(std::env::current_dir()?)
}

pub fn trial_reset_at(root: impl Into<PathBuf>) -> Result<(), AppError> {
    let root: PathBuf = root.into();
    trial::reset(&FilesystemTrialStore::new(&root))
}
