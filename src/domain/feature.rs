use std::collections::HashSet;
use std::fmt;

use crate::domain::AppError;
use crate::domain::contract::ResultContract;

/// Upper bound on caller-supplied inputs per feature.
pub const MAX_INPUTS: usize = 4;

/// A validated feature identifier.
///
/// Guarantees:
/// - Non-empty
/// - Lowercase ASCII letters, digits, and single hyphens
/// - Does not start or end with a hyphen
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: &str) -> Result<Self, AppError> {
        let valid = !id.is_empty()
            && !id.starts_with('-')
            && !id.ends_with('-')
            && !id.contains("--")
            && id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AppError::InvalidFeatureId(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a single input is collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    FreeText,
    /// One of a fixed set of options.
    Choice(Vec<String>),
}

/// A caller-supplied value the prompt template interpolates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
}

/// One business tool: its inputs, prompt template, and result contract.
#[derive(Debug, Clone)]
pub struct FeatureDefinition {
    id: FeatureId,
    title: String,
    summary: String,
    inputs: Vec<InputSpec>,
    template: String,
    contract: ResultContract,
}

impl FeatureDefinition {
    pub fn new(
        id: FeatureId,
        title: impl Into<String>,
        summary: impl Into<String>,
        inputs: Vec<InputSpec>,
        template: impl Into<String>,
        contract: ResultContract,
    ) -> Result<Self, AppError> {
        if inputs.is_empty() || inputs.len() > MAX_INPUTS {
            return Err(AppError::AssetError(format!(
                "Feature '{}' must declare between 1 and {} inputs (found {})",
                id,
                MAX_INPUTS,
                inputs.len()
            )));
        }

        let mut names = HashSet::new();
        for input in &inputs {
            if !names.insert(input.name.as_str()) {
                return Err(AppError::AssetError(format!(
                    "Feature '{}' declares input '{}' twice",
                    id, input.name
                )));
            }
            if let InputKind::Choice(options) = &input.kind
                && options.is_empty()
            {
                return Err(AppError::AssetError(format!(
                    "Feature '{}' input '{}' has no choices",
                    id, input.name
                )));
            }
        }

        let template = template.into();
        if template.trim().is_empty() {
            return Err(AppError::AssetError(format!("Feature '{}' has an empty template", id)));
        }

        Ok(Self { id, title: title.into(), summary: summary.into(), inputs, template, contract })
    }

    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn contract(&self) -> &ResultContract {
        &self.contract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_input(name: &str) -> InputSpec {
        InputSpec { name: name.to_string(), label: name.to_string(), kind: InputKind::FreeText }
    }

    fn contract() -> ResultContract {
        ResultContract::builder().text("tagline", "Built for busy founders").build().unwrap()
    }

    #[test]
    fn valid_feature_ids() {
        assert!(FeatureId::new("creator-funnel").is_ok());
        assert!(FeatureId::new("swot2").is_ok());
    }

    #[test]
    fn invalid_feature_ids() {
        for id in ["", "Upper", "has space", "-lead", "trail-", "double--dash", "under_score"] {
            assert!(FeatureId::new(id).is_err(), "{id} should be rejected");
        }
    }

    #[test]
    fn display_impl() {
        assert_eq!(FeatureId::new("ad-copy").unwrap().to_string(), "ad-copy");
    }

    #[test]
    fn rejects_too_many_inputs() {
        let inputs = (0..5).map(|i| text_input(&format!("in{i}"))).collect();
        let err = FeatureDefinition::new(
            FeatureId::new("x").unwrap(),
            "X",
            "x",
            inputs,
            "{{ in0 }}",
            contract(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::AssetError(_)));
    }

    #[test]
    fn rejects_duplicate_inputs() {
        let inputs = vec![text_input("brand"), text_input("brand")];
        assert!(
            FeatureDefinition::new(FeatureId::new("x").unwrap(), "X", "x", inputs, "t", contract())
                .is_err()
        );
    }

    #[test]
    fn rejects_empty_choice_list() {
        let inputs = vec![InputSpec {
            name: "tone".into(),
            label: "Tone".into(),
            kind: InputKind::Choice(vec![]),
        }];
        assert!(
            FeatureDefinition::new(FeatureId::new("x").unwrap(), "X", "x", inputs, "t", contract())
                .is_err()
        );
    }

    #[test]
    fn input_lookup() {
        let feature = FeatureDefinition::new(
            FeatureId::new("tagline").unwrap(),
            "Tagline",
            "Short brand lines",
            vec![text_input("brand")],
            "Write a tagline for {{ brand }}",
            contract(),
        )
        .unwrap();
        assert_eq!(feature.input("brand").map(|i| i.label.as_str()), Some("brand"));
        assert!(feature.input("tone").is_none());
    }
}
