pub mod catalogs;
pub mod gemini_client_http;
pub mod memory_trial_store;
pub mod template;
pub mod trial_state_filesystem;

pub use catalogs::EmbeddedFeatureCatalog;
pub use gemini_client_http::HttpGenerativeBackend;
pub use memory_trial_store::MemoryTrialStore;
pub use template::MinijinjaTemplateRenderer;
pub use trial_state_filesystem::FilesystemTrialStore;
