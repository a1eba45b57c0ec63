//! A feature panel: one form, one in-flight request, one rendered result.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{
    Access, AppError, FeatureDefinition, FeatureInputs, TemplateRenderer, TrialState,
    assemble_prompt,
};
use crate::ports::GenerativeBackend;

/// Callbacks a panel's container supplies.
pub trait PanelEvents {
    /// The trial gate is closed; the container should start its upgrade flow.
    fn upgrade_requested(&mut self);

    /// This invocation spent the free trial.
    fn trial_used(&mut self, trial: TrialState);
}

/// Lifecycle of a single panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    Loading,
    Ready(Value),
    Failed,
}

/// What an invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutcome {
    Rendered(Value),
    UpgradeRequested,
}

/// Build the prompt for `feature` and make exactly one backend call.
///
/// The backend's value is returned uninspected and its errors propagate as-is.
pub fn send_prompt<B, R>(
    feature: &FeatureDefinition,
    inputs: &FeatureInputs,
    renderer: &R,
    backend: &B,
) -> Result<Value, AppError>
where
    B: GenerativeBackend + ?Sized,
    R: TemplateRenderer + ?Sized,
{
    let prompt = assemble_prompt(feature, inputs, renderer)?;
    debug!(feature = %feature.id(), chars = prompt.len(), "prompt assembled");
    backend.generate(&prompt)
}

pub struct Panel<'a, B: GenerativeBackend + ?Sized, R: TemplateRenderer + ?Sized> {
    feature: &'a FeatureDefinition,
    access: Access,
    backend: &'a B,
    renderer: &'a R,
    state: PanelState,
}

impl<'a, B, R> Panel<'a, B, R>
where
    B: GenerativeBackend + ?Sized,
    R: TemplateRenderer + ?Sized,
{
    pub fn new(feature: &'a FeatureDefinition, access: Access, backend: &'a B, renderer: &'a R) -> Self {
        Self { feature, access, backend, renderer, state: PanelState::Idle }
    }

    pub fn feature(&self) -> &FeatureDefinition {
        self.feature
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Run the feature once.
    ///
    /// A closed gate fires `upgrade_requested` and never reaches the backend.
    /// A backend failure leaves the panel `Failed` with the trial untouched.
    pub fn invoke(
        &mut self,
        inputs: &FeatureInputs,
        events: &mut dyn PanelEvents,
    ) -> Result<PanelOutcome, AppError> {
        if !self.access.admits() {
            info!(feature = %self.feature.id(), "free trial already used; requesting upgrade");
            events.upgrade_requested();
            return Ok(PanelOutcome::UpgradeRequested);
        }

        self.state = PanelState::Loading;
        let raw = match send_prompt(self.feature, inputs, self.renderer, self.backend) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(feature = %self.feature.id(), error = %err, "feature invocation failed");
                self.state = PanelState::Failed;
                return Err(err);
            }
        };

        let value = self.feature.contract().normalize_or_fallback(&raw);

        if self.access.consume(Utc::now()) {
            events.trial_used(self.access.trial);
        }

        self.state = PanelState::Ready(value.clone());
        Ok(PanelOutcome::Rendered(value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::MinijinjaTemplateRenderer;
    use crate::domain::{FeatureId, InputKind, InputSpec, ResultContract};
    use crate::testing::{FakeBackend, RecordingEvents};

    fn tagline_feature() -> FeatureDefinition {
        FeatureDefinition::new(
            FeatureId::new("tagline").unwrap(),
            "Tagline",
            "Short brand lines",
            vec![InputSpec { name: "brand".into(), label: "Brand".into(), kind: InputKind::FreeText }],
            "Write taglines for {{ brand }}.",
            ResultContract::builder()
                .list("taglines", ["Made for mornings"])
                .text("favorite", "Made for mornings")
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    fn inputs(feature: &FeatureDefinition) -> FeatureInputs {
        FeatureInputs::collect(feature, [("brand", "Acme Coffee")]).unwrap()
    }

    #[test]
    fn first_invocation_renders_and_spends_trial() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!({"taglines": ["Wake up happy"], "favorite": "Wake up happy"}));
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let mut panel = Panel::new(&feature, Access::default(), &backend, &renderer);

        let outcome = panel.invoke(&inputs(&feature), &mut events).unwrap();

        assert_eq!(
            outcome,
            PanelOutcome::Rendered(json!({"taglines": ["Wake up happy"], "favorite": "Wake up happy"}))
        );
        assert!(matches!(panel.state(), PanelState::Ready(_)));
        assert_eq!(events.trial_used.len(), 1);
        assert_eq!(events.upgrade_requests, 0);
        assert!(backend.prompts()[0].contains("Write taglines for Acme Coffee."));
    }

    #[test]
    fn second_invocation_requests_upgrade_without_calling_backend() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!({}));
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let mut panel = Panel::new(&feature, Access::default(), &backend, &renderer);

        panel.invoke(&inputs(&feature), &mut events).unwrap();
        let outcome = panel.invoke(&inputs(&feature), &mut events).unwrap();

        assert_eq!(outcome, PanelOutcome::UpgradeRequested);
        assert_eq!(backend.prompts().len(), 1);
        assert_eq!(events.upgrade_requests, 1);
        assert_eq!(events.trial_used.len(), 1);
    }

    #[test]
    fn consumed_access_from_container_is_respected() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!({}));
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let access = Access::new(TrialState::Consumed { at: Utc::now() }, false);
        let mut panel = Panel::new(&feature, access, &backend, &renderer);

        let outcome = panel.invoke(&inputs(&feature), &mut events).unwrap();

        assert_eq!(outcome, PanelOutcome::UpgradeRequested);
        assert!(backend.prompts().is_empty());
        assert_eq!(panel.state(), &PanelState::Idle);
    }

    #[test]
    fn transport_failure_keeps_trial_and_leaves_no_result() {
        let feature = tagline_feature();
        let backend = FakeBackend::failing("connection reset");
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let mut panel = Panel::new(&feature, Access::default(), &backend, &renderer);

        let err = panel.invoke(&inputs(&feature), &mut events).unwrap_err();

        assert!(matches!(err, AppError::TransportFailure { .. }));
        assert_eq!(panel.state(), &PanelState::Failed);
        assert!(panel.access().admits());
        assert!(events.trial_used.is_empty());
    }

    #[test]
    fn non_object_reply_renders_fallback() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!("I cannot do that"));
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let mut panel = Panel::new(&feature, Access::default(), &backend, &renderer);

        let outcome = panel.invoke(&inputs(&feature), &mut events).unwrap();

        assert_eq!(outcome, PanelOutcome::Rendered(feature.contract().fallback()));
    }

    #[test]
    fn subscriber_invokes_repeatedly_without_spending_trial() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!({}));
        let renderer = MinijinjaTemplateRenderer::new();
        let mut events = RecordingEvents::default();
        let mut panel = Panel::new(&feature, Access::new(TrialState::Available, true), &backend, &renderer);

        for _ in 0..3 {
            assert!(matches!(
                panel.invoke(&inputs(&feature), &mut events).unwrap(),
                PanelOutcome::Rendered(_)
            ));
        }
        assert_eq!(backend.prompts().len(), 3);
        assert!(events.trial_used.is_empty());
    }

    #[test]
    fn send_prompt_returns_backend_value_uninspected() {
        let feature = tagline_feature();
        let backend = FakeBackend::replying(json!({"unexpected": 1}));
        let value =
            send_prompt(&feature, &inputs(&feature), &MinijinjaTemplateRenderer::new(), &backend).unwrap();
        assert_eq!(value, json!({"unexpected": 1}));
    }
}
