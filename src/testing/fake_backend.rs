use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::app::commands::run::BackendFactory;
use crate::domain::AppError;
use crate::ports::GenerativeBackend;

#[derive(Clone)]
pub struct FakeBackend {
    pub prompts: Arc<Mutex<Vec<String>>>,
    reply: Result<Value, String>,
}

impl FakeBackend {
    pub fn replying(value: Value) -> Self {
        Self { prompts: Arc::new(Mutex::new(vec![])), reply: Ok(value) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { prompts: Arc::new(Mutex::new(vec![])), reply: Err(message.into()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl GenerativeBackend for FakeBackend {
    fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(AppError::transport(message.clone(), None)),
        }
    }
}

pub struct FakeBackendFactory {
    pub backend: FakeBackend,
}

impl FakeBackendFactory {
    pub fn new(backend: FakeBackend) -> Self {
        Self { backend }
    }
}

impl BackendFactory for FakeBackendFactory {
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, AppError> {
        Ok(Box::new(self.backend.clone()))
    }
}
