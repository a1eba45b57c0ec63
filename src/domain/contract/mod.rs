//! Result shape contracts.
//!
//! A contract lists the fields a feature's rendered output needs, in display
//! order, together with a literal fallback for every scalar and sequence field.
//! Record fields nest another contract and derive their fallback from it.

mod normalize;

pub use normalize::normalize_as;

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::domain::AppError;

/// Semantic type of a contract field, carrying its fallback content.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A display string.
    Text { fallback: String },
    /// An ordered sequence of display strings.
    TextList { fallback: Vec<String> },
    /// A nested record with its own contract.
    Record(ResultContract),
}

/// One named field of a [`ResultContract`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Literal content substituted when the backend value cannot be used.
    pub fn fallback(&self) -> Value {
        match &self.kind {
            FieldKind::Text { fallback } => Value::String(fallback.clone()),
            FieldKind::TextList { fallback } => {
                Value::Array(fallback.iter().cloned().map(Value::String).collect())
            }
            FieldKind::Record(contract) => contract.fallback(),
        }
    }

    fn shape_hint(&self) -> Value {
        match &self.kind {
            FieldKind::Text { .. } => Value::String("string".to_string()),
            FieldKind::TextList { .. } => Value::Array(vec![Value::String("string".to_string())]),
            FieldKind::Record(contract) => contract.shape_hint(),
        }
    }

    fn conforms(&self, value: Option<&Value>) -> bool {
        match (&self.kind, value) {
            (FieldKind::Text { .. }, Some(Value::String(_))) => true,
            (FieldKind::TextList { .. }, Some(Value::Array(items))) => {
                items.iter().all(Value::is_string)
            }
            (FieldKind::Record(contract), Some(value)) => contract.conforms(value),
            _ => false,
        }
    }
}

/// Ordered set of fields a feature panel expects to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultContract {
    fields: Vec<FieldSpec>,
}

impl ResultContract {
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The complete fallback payload, assembled as one object.
    pub fn fallback(&self) -> Value {
        let object: Map<String, Value> =
            self.fields.iter().map(|field| (field.name.clone(), field.fallback())).collect();
        Value::Object(object)
    }

    /// JSON skeleton naming every field and its type, for embedding in prompts.
    pub fn shape_hint(&self) -> Value {
        let object: Map<String, Value> =
            self.fields.iter().map(|field| (field.name.clone(), field.shape_hint())).collect();
        Value::Object(object)
    }

    /// Whether every declared field is present with its declared top-level type.
    pub fn conforms(&self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };
        self.fields.iter().all(|field| field.conforms(object.get(&field.name)))
    }
}

/// Incremental constructor for [`ResultContract`]; validation happens in `build`.
#[derive(Debug, Default)]
pub struct ContractBuilder {
    fields: Vec<FieldSpec>,
}

impl ContractBuilder {
    pub fn text(mut self, name: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.fields
            .push(FieldSpec { name: name.into(), kind: FieldKind::Text { fallback: fallback.into() } });
        self
    }

    pub fn list<I, S>(mut self, name: impl Into<String>, fallback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fallback = fallback.into_iter().map(Into::into).collect();
        self.fields.push(FieldSpec { name: name.into(), kind: FieldKind::TextList { fallback } });
        self
    }

    pub fn record(mut self, name: impl Into<String>, contract: ResultContract) -> Self {
        self.fields.push(FieldSpec { name: name.into(), kind: FieldKind::Record(contract) });
        self
    }

    pub fn build(self) -> Result<ResultContract, AppError> {
        if self.fields.is_empty() {
            return Err(AppError::InvalidContract("contract declares no fields".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(AppError::InvalidContract("field name must not be empty".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(AppError::InvalidContract(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            match &field.kind {
                FieldKind::Text { fallback } if fallback.trim().is_empty() => {
                    return Err(AppError::InvalidContract(format!(
                        "text field '{}' needs a non-empty fallback",
                        field.name
                    )));
                }
                FieldKind::TextList { fallback }
                    if fallback.is_empty() || fallback.iter().any(|item| item.trim().is_empty()) =>
                {
                    return Err(AppError::InvalidContract(format!(
                        "list field '{}' needs non-empty fallback entries",
                        field.name
                    )));
                }
                _ => {}
            }
        }

        Ok(ResultContract { fields: self.fields })
    }
}
