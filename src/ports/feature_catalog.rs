use crate::domain::{AppError, FeatureDefinition};

/// Port for looking up feature definitions.
pub trait FeatureCatalog {
    /// All features, in display order.
    fn list(&self) -> Vec<&FeatureDefinition>;

    /// A feature by its identifier.
    fn get(&self, id: &str) -> Option<&FeatureDefinition>;

    /// Like `get`, but reports the available identifiers on a miss.
    fn require(&self, id: &str) -> Result<&FeatureDefinition, AppError> {
        self.get(id).ok_or_else(|| AppError::FeatureNotFound {
            name: id.to_string(),
            available: self
                .list()
                .iter()
                .map(|feature| feature.id().as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
