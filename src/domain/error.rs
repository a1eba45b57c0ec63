use std::io;

use thiserror::Error;

use crate::domain::prompt::PromptAssemblyError;

/// Library-wide error type for copyforge operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration value out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// `.copyforge/` already exists at the target location.
    #[error(".copyforge/ workspace already exists")]
    WorkspaceExists,

    /// The outbound call to the generative backend did not complete.
    #[error("Generative backend request failed: {message}")]
    TransportFailure { message: String, status: Option<u16> },

    /// The decoded backend payload is not a JSON object.
    #[error("Backend response is not an object (got {0})")]
    InvalidResponseShape(String),

    /// Feature identifier is malformed.
    #[error("Invalid feature identifier '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidFeatureId(String),

    /// Feature not present in the catalog.
    #[error("Feature '{name}' not found. Available: {available}")]
    FeatureNotFound { name: String, available: String },

    /// A declared input was not supplied.
    #[error("Feature '{feature}' requires input '{input}'")]
    MissingInput { feature: String, input: String },

    /// An input was supplied but is blank after trimming.
    #[error("Input '{0}' must not be empty")]
    EmptyInput(String),

    /// An input name the feature does not declare.
    #[error("Feature '{feature}' has no input named '{input}'")]
    UnknownInput { feature: String, input: String },

    /// A choice input received a value outside its options.
    #[error("Input '{input}' does not accept '{value}'. Choose one of: {allowed}")]
    InvalidChoice { input: String, value: String, allowed: String },

    /// A result shape contract failed validation.
    #[error("Invalid result contract: {0}")]
    InvalidContract(String),

    /// Embedded asset missing or malformed.
    #[error("Asset error: {0}")]
    AssetError(String),

    /// Prompt assembly failed.
    #[error("Prompt assembly failed: {0}")]
    PromptAssemblyError(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Interactive input could not be read.
    #[error("{0}")]
    Validation(String),
}

impl From<PromptAssemblyError> for AppError {
    fn from(err: PromptAssemblyError) -> Self {
        AppError::PromptAssemblyError(err.to_string())
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn transport<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::TransportFailure { message: message.into(), status }
    }

    /// Provide an `io::ErrorKind`-like view for callers that branch on error class.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::InvalidFeatureId(_)
            | AppError::MissingInput { .. }
            | AppError::EmptyInput(_)
            | AppError::UnknownInput { .. }
            | AppError::InvalidChoice { .. }
            | AppError::InvalidContract(_)
            | AppError::PromptAssemblyError(_)
            | AppError::ParseError { .. }
            | AppError::Validation(_) => io::ErrorKind::InvalidInput,
            AppError::EnvironmentVariableMissing(_) | AppError::FeatureNotFound { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::WorkspaceExists => io::ErrorKind::AlreadyExists,
            AppError::InvalidResponseShape(_) | AppError::AssetError(_) => {
                io::ErrorKind::InvalidData
            }
            AppError::TransportFailure { .. } => io::ErrorKind::Other,
        }
    }
}
