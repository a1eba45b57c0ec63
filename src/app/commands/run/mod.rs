//! Run command: invoke one feature through its panel and persist the trial.

mod backend;

use serde_json::Value;
use tracing::info;
use url::Url;

use crate::adapters::MinijinjaTemplateRenderer;
use crate::app::AppContext;
use crate::app::panel::{Panel, PanelEvents, PanelOutcome};
use crate::domain::{Access, AppError, FeatureInputs, TrialState};
use crate::ports::{FeatureCatalog, GenerativeBackend, MockBackend, TrialStore};

pub use backend::{BackendFactory, HttpBackendFactory, LazyBackend};

/// Options for a single feature run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Feature identifier.
    pub feature: String,
    /// `(input name, value)` pairs; later pairs win.
    pub inputs: Vec<(String, String)>,
    /// Answer from the offline backend instead of the network.
    pub mock: bool,
}

/// Result of a run execution.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// The backend answered; `value` conforms to the feature's contract.
    Rendered { feature: String, value: Value },
    /// The free trial is spent and the caller is not subscribed.
    UpgradeRequested { upgrade_url: Url },
}

/// Container-side record of what the panel reported.
#[derive(Debug, Default)]
struct TrialRecorder {
    consumed: Option<TrialState>,
}

impl PanelEvents for TrialRecorder {
    fn upgrade_requested(&mut self) {}

    fn trial_used(&mut self, trial: TrialState) {
        self.consumed = Some(trial);
    }
}

/// Execute the run command.
pub fn execute<C, S>(ctx: &AppContext<C, S>, options: RunOptions) -> Result<RunResult, AppError>
where
    C: FeatureCatalog,
    S: TrialStore,
{
    let factory = HttpBackendFactory::new(ctx.config().backend.clone());
    execute_with_factory(ctx, options, &factory)
}

pub(crate) fn execute_with_factory<C, S>(
    ctx: &AppContext<C, S>,
    options: RunOptions,
    factory: &dyn BackendFactory,
) -> Result<RunResult, AppError>
where
    C: FeatureCatalog,
    S: TrialStore,
{
    let feature = ctx.catalog().require(&options.feature)?;
    let inputs = FeatureInputs::collect(feature, options.inputs.iter().map(|(k, v)| (k, v)))?;
    let access = Access::new(ctx.trial_store().load()?, ctx.config().access.subscribed);

    let backend: Box<dyn GenerativeBackend + '_> =
        if options.mock { Box::new(MockBackend) } else { Box::new(LazyBackend::new(factory)) };
    let renderer = MinijinjaTemplateRenderer::new();
    let mut panel = Panel::new(feature, access, backend.as_ref(), &renderer);
    let mut recorder = TrialRecorder::default();

    let outcome = panel.invoke(&inputs, &mut recorder)?;

    if let Some(trial) = recorder.consumed {
        ctx.trial_store().save(&trial)?;
        info!(feature = %feature.id(), "free trial consumed");
    }

    Ok(match outcome {
        PanelOutcome::Rendered(value) => {
            RunResult::Rendered { feature: feature.id().to_string(), value }
        }
        PanelOutcome::UpgradeRequested => {
            RunResult::UpgradeRequested { upgrade_url: ctx.config().access.upgrade_url.clone() }
        }
    })
}
