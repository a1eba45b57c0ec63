pub mod config;
pub mod contract;
pub mod error;
pub mod feature;
pub mod inputs;
pub mod prompt;
pub mod trial;

pub use config::{AccessConfig, AppConfig, BackendConfig};
pub use contract::{ContractBuilder, FieldKind, FieldSpec, ResultContract, normalize_as};
pub use error::AppError;
pub use feature::{FeatureDefinition, FeatureId, InputKind, InputSpec};
pub use inputs::FeatureInputs;
pub use prompt::{PromptAssemblyError, PromptContext, TemplateRenderer, assemble_prompt};
pub use trial::{Access, TrialState};
