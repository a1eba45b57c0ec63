//! Feature listing and description.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{AppError, InputKind};
use crate::ports::FeatureCatalog;

/// Summary information for a feature.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
}

/// Detailed information for a feature.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureDetail {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub inputs: Vec<InputInfo>,
    /// The JSON shape the model is asked to return.
    pub shape: Value,
}

/// A form field the feature asks for.
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    pub name: String,
    pub label: String,
    /// Empty for free-text inputs.
    pub choices: Vec<String>,
}

pub fn list<C: FeatureCatalog>(catalog: &C) -> Vec<FeatureSummary> {
    catalog
        .list()
        .into_iter()
        .map(|feature| FeatureSummary {
            id: feature.id().to_string(),
            title: feature.title().to_string(),
            summary: feature.summary().to_string(),
        })
        .collect()
}

pub fn describe<C: FeatureCatalog>(catalog: &C, id: &str) -> Result<FeatureDetail, AppError> {
    let feature = catalog.require(id)?;

    Ok(FeatureDetail {
        id: feature.id().to_string(),
        title: feature.title().to_string(),
        summary: feature.summary().to_string(),
        inputs: feature
            .inputs()
            .iter()
            .map(|input| InputInfo {
                name: input.name.clone(),
                label: input.label.clone(),
                choices: match &input.kind {
                    InputKind::FreeText => Vec::new(),
                    InputKind::Choice(options) => options.clone(),
                },
            })
            .collect(),
        shape: feature.contract().shape_hint(),
    })
}
