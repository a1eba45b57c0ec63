//! Defensive decoding of untyped backend payloads into a contract's shape.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{FieldKind, FieldSpec, ResultContract};
use crate::domain::AppError;

impl ResultContract {
    /// Coerce `raw` field by field into this contract.
    ///
    /// Field-level mismatches never fail: strings are kept, nested values in
    /// text positions are stringified, and anything else is replaced with the
    /// field's fallback. Only a non-object payload is rejected.
    pub fn normalize(&self, raw: &Value) -> Result<Value, AppError> {
        let Some(object) = raw.as_object() else {
            return Err(AppError::InvalidResponseShape(json_type(raw).to_string()));
        };
        Ok(Value::Object(self.normalize_object(object, "")))
    }

    /// Like [`normalize`](Self::normalize), but substitutes the whole fallback
    /// payload when the input is not an object.
    pub fn normalize_or_fallback(&self, raw: &Value) -> Value {
        match self.normalize(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "substituting full fallback payload");
                self.fallback()
            }
        }
    }

    fn normalize_object(&self, object: &Map<String, Value>, path: &str) -> Map<String, Value> {
        self.fields()
            .iter()
            .map(|field| {
                let field_path = join_path(path, field.name());
                let value = normalize_field(field, object.get(field.name()), &field_path);
                (field.name().to_string(), value)
            })
            .collect()
    }
}

/// Normalize `raw` against `contract` and decode it as `T`.
///
/// Returns `fallback` when the payload is not an object or when `T` does not
/// line up with the contract.
pub fn normalize_as<T: DeserializeOwned>(raw: &Value, contract: &ResultContract, fallback: T) -> T {
    let normalized = match contract.normalize(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "substituting typed fallback");
            return fallback;
        }
    };

    match serde_json::from_value(normalized) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(error = %err, "normalized payload does not match target type");
            fallback
        }
    }
}

fn normalize_field(field: &FieldSpec, raw: Option<&Value>, path: &str) -> Value {
    match (field.kind(), raw) {
        (FieldKind::Text { .. }, Some(Value::String(text))) => Value::String(text.clone()),
        (FieldKind::Text { .. }, Some(nested @ (Value::Object(_) | Value::Array(_)))) => {
            debug!(field = path, "stringifying nested value in text field");
            Value::String(nested.to_string())
        }
        (FieldKind::TextList { .. }, Some(Value::Array(items))) => {
            let kept: Vec<Value> =
                items.iter().filter_map(|item| coerce_list_item(item, path)).collect();
            if kept.is_empty() && !items.is_empty() {
                debug!(field = path, "no usable list elements, substituting field fallback");
                return field.fallback();
            }
            Value::Array(kept)
        }
        (FieldKind::Record(contract), Some(Value::Object(object))) => {
            Value::Object(contract.normalize_object(object, path))
        }
        (_, found) => {
            debug!(
                field = path,
                found = found.map(json_type).unwrap_or("nothing"),
                "substituting field fallback"
            );
            field.fallback()
        }
    }
}

fn coerce_list_item(item: &Value, path: &str) -> Option<Value> {
    match item {
        Value::String(text) => Some(Value::String(text.clone())),
        Value::Object(_) | Value::Array(_) => Some(Value::String(item.to_string())),
        other => {
            debug!(field = path, found = json_type(other), "dropping non-text list element");
            None
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() { name.to_string() } else { format!("{parent}.{name}") }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
