//! Prompt assembly for feature templates.

use std::collections::BTreeMap;

use crate::domain::feature::FeatureDefinition;
use crate::domain::inputs::FeatureInputs;

const RESPONSE_INSTRUCTIONS: &str = "Respond with a single JSON object and nothing else. \
Use exactly these keys and value types:";

/// Variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Variable name to value mapping.
    pub variables: BTreeMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the context.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }
}

impl From<&FeatureInputs> for PromptContext {
    fn from(inputs: &FeatureInputs) -> Self {
        inputs.iter().fold(PromptContext::new(), |ctx, (name, value)| ctx.with_var(name, value))
    }
}

/// Error during prompt assembly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PromptAssemblyError {
    /// Failed to render a template with the provided context.
    #[error("Failed to render template {template}: {reason}")]
    TemplateRenderError { template: String, reason: String },

    /// Template uses syntax beyond plain interpolation.
    #[error("Template {template} uses disallowed syntax '{token}'")]
    TemplateSyntaxNotAllowed { template: String, token: String },

    /// Shape hint could not be serialized.
    #[error("Failed to describe result shape for {template}: {reason}")]
    ShapeHintError { template: String, reason: String },
}

/// Trait for rendering templates.
///
/// Keeps the template engine out of the domain layer.
pub trait TemplateRenderer {
    /// Render `template` with `context`; `template_name` is used for error reporting.
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, PromptAssemblyError>;
}

/// Render a feature's template with validated inputs and append the JSON shape it expects.
pub fn assemble_prompt<R: TemplateRenderer + ?Sized>(
    feature: &FeatureDefinition,
    inputs: &FeatureInputs,
    renderer: &R,
) -> Result<String, PromptAssemblyError> {
    let context = PromptContext::from(inputs);
    let body = renderer.render(feature.template(), &context, feature.id().as_str())?;

    let shape = serde_json::to_string_pretty(&feature.contract().shape_hint()).map_err(|err| {
        PromptAssemblyError::ShapeHintError {
            template: feature.id().to_string(),
            reason: err.to_string(),
        }
    })?;

    Ok(format!("{}\n\n{}\n{}\n", body.trim_end(), RESPONSE_INSTRUCTIONS, shape))
}
