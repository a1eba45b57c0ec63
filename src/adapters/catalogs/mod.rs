pub mod embedded_feature_catalog;

pub use self::embedded_feature_catalog::EmbeddedFeatureCatalog;
