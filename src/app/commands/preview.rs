use crate::adapters::MinijinjaTemplateRenderer;
use crate::domain::{AppError, FeatureInputs, assemble_prompt};
use crate::ports::FeatureCatalog;

/// Assemble the prompt a run would send, without touching the backend or the trial.
pub fn execute<C, I, K, V>(catalog: &C, id: &str, inputs: I) -> Result<String, AppError>
where
    C: FeatureCatalog,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let feature = catalog.require(id)?;
    let inputs = FeatureInputs::collect(feature, inputs)?;
    Ok(assemble_prompt(feature, &inputs, &MinijinjaTemplateRenderer::new())?)
}
