use serde_json::Value;

use crate::adapters::HttpGenerativeBackend;
use crate::domain::{AppError, BackendConfig};
use crate::ports::GenerativeBackend;

/// Factory for creating a generative backend on demand.
pub trait BackendFactory {
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, AppError>;
}

/// Builds the HTTP backend from configuration and `GEMINI_API_KEY`.
pub struct HttpBackendFactory {
    config: BackendConfig,
}

impl HttpBackendFactory {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

impl BackendFactory for HttpBackendFactory {
    fn create(&self) -> Result<Box<dyn GenerativeBackend>, AppError> {
        Ok(Box::new(HttpGenerativeBackend::from_env(&self.config)?))
    }
}

/// Defers backend construction to the first call.
///
/// A gated run never reaches `generate`, so it never needs an API key.
pub struct LazyBackend<'a> {
    factory: &'a dyn BackendFactory,
}

impl<'a> LazyBackend<'a> {
    pub fn new(factory: &'a dyn BackendFactory) -> Self {
        Self { factory }
    }
}

impl GenerativeBackend for LazyBackend<'_> {
    fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        self.factory.create()?.generate(prompt)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{FakeBackend, FakeBackendFactory};

    struct FailingFactory;

    impl BackendFactory for FailingFactory {
        fn create(&self) -> Result<Box<dyn GenerativeBackend>, AppError> {
            Err(AppError::EnvironmentVariableMissing("GEMINI_API_KEY".into()))
        }
    }

    #[test]
    fn lazy_backend_delegates_to_created_backend() {
        let backend = FakeBackend::replying(json!({"ok": "yes"}));
        let factory = FakeBackendFactory::new(backend.clone());

        let value = LazyBackend::new(&factory).generate("hello").unwrap();

        assert_eq!(value, json!({"ok": "yes"}));
        assert_eq!(backend.prompts(), vec!["hello".to_string()]);
    }

    #[test]
    fn lazy_backend_surfaces_factory_errors() {
        let err = LazyBackend::new(&FailingFactory).generate("hello").unwrap_err();
        assert!(matches!(err, AppError::EnvironmentVariableMissing(_)));
    }
}
