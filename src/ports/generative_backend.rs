//! Generative-text backend port definition.

use serde_json::{Map, Value};

use crate::domain::AppError;

/// Port for the single generative-text call every feature makes.
pub trait GenerativeBackend {
    /// Submit a prompt and return the decoded JSON reply, uninspected.
    fn generate(&self, prompt: &str) -> Result<Value, AppError>;
}

impl<B: GenerativeBackend + ?Sized> GenerativeBackend for Box<B> {
    fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        (**self).generate(prompt)
    }
}

/// Offline backend that answers every prompt with an empty object.
#[derive(Debug, Clone, Default)]
pub struct MockBackend;

impl GenerativeBackend for MockBackend {
    fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        eprintln!("=== MOCK MODE ===");
        eprintln!("Would send prompt to the generative backend:");
        eprintln!("  Prompt length: {} chars", prompt.len());
        eprintln!("  Reply: {{}} (every field uses its fallback)");

        Ok(Value::Object(Map::new()))
    }
}
