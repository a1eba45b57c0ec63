//! Caller-side validation of feature inputs.

use std::collections::BTreeMap;

use crate::domain::AppError;
use crate::domain::feature::{FeatureDefinition, InputKind};

/// Trimmed, non-empty values for every input a feature declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInputs {
    values: BTreeMap<String, String>,
}

impl FeatureInputs {
    /// Validate `provided` name/value pairs against the feature's declared inputs.
    ///
    /// Later pairs override earlier ones with the same name.
    pub fn collect<I, K, V>(feature: &FeatureDefinition, provided: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = BTreeMap::new();
        for (name, value) in provided {
            let name = name.as_ref().trim();
            if feature.input(name).is_none() {
                return Err(AppError::UnknownInput {
                    feature: feature.id().to_string(),
                    input: name.to_string(),
                });
            }
            raw.insert(name.to_string(), value.as_ref().trim().to_string());
        }

        let mut values = BTreeMap::new();
        for spec in feature.inputs() {
            let Some(value) = raw.remove(&spec.name) else {
                return Err(AppError::MissingInput {
                    feature: feature.id().to_string(),
                    input: spec.name.clone(),
                });
            };
            if value.is_empty() {
                return Err(AppError::EmptyInput(spec.name.clone()));
            }

            let value = match &spec.kind {
                InputKind::FreeText => value,
                InputKind::Choice(options) => options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(&value))
                    .cloned()
                    .ok_or_else(|| AppError::InvalidChoice {
                        input: spec.name.clone(),
                        value: value.clone(),
                        allowed: options.join(", "),
                    })?,
            };
            values.insert(spec.name.clone(), value);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
