use std::collections::HashSet;

use include_dir::{Dir, DirEntry, include_dir};
use serde::Deserialize;

use crate::domain::{
    AppError, ContractBuilder, FeatureDefinition, FeatureId, InputKind, InputSpec, ResultContract,
};
use crate::ports::FeatureCatalog;

static FEATURES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/features");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureYaml {
    id: String,
    title: String,
    summary: String,
    inputs: Vec<InputYaml>,
    template: String,
    fields: Vec<FieldYaml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputYaml {
    name: String,
    label: String,
    #[serde(default)]
    choices: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum FieldYaml {
    Text { name: String, fallback: String },
    List { name: String, fallback: Vec<String> },
    Record { name: String, fields: Vec<FieldYaml> },
}

/// Feature catalog compiled into the binary from `src/assets/features/*.yml`.
#[derive(Debug, Clone)]
pub struct EmbeddedFeatureCatalog {
    features: Vec<FeatureDefinition>,
}

impl EmbeddedFeatureCatalog {
    pub fn load() -> Result<Self, AppError> {
        let mut files = Vec::new();
        collect_feature_files(&FEATURES_DIR, &mut files);
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Self::from_sources(files)
    }

    /// Build a catalog from `(path, yaml)` pairs; each file must be named `<id>.yml`.
    pub fn from_sources<I, P, C>(sources: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut features = Vec::new();

        for (path, content) in sources {
            let path = path.as_ref();
            let feature = parse_feature(path, content.as_ref())?;

            let expected = format!("{}.yml", feature.id());
            if file_name(path) != expected {
                return Err(AppError::AssetError(format!(
                    "Feature '{}' must live in {} (found {})",
                    feature.id(),
                    expected,
                    path
                )));
            }
            if !seen.insert(feature.id().clone()) {
                return Err(AppError::AssetError(format!(
                    "Duplicate feature entry '{}'",
                    feature.id()
                )));
            }
            features.push(feature);
        }

        if features.is_empty() {
            return Err(AppError::AssetError("Feature catalog is empty".to_string()));
        }

        Ok(Self { features })
    }
}

impl FeatureCatalog for EmbeddedFeatureCatalog {
    fn list(&self) -> Vec<&FeatureDefinition> {
        self.features.iter().collect()
    }

    fn get(&self, id: &str) -> Option<&FeatureDefinition> {
        self.features.iter().find(|feature| feature.id().as_str() == id)
    }
}

fn parse_feature(path: &str, content: &str) -> Result<FeatureDefinition, AppError> {
    let yaml: FeatureYaml = serde_yaml::from_str(content).map_err(|err| {
        AppError::AssetError(format!("Failed to parse feature {}: {}", path, err))
    })?;

    let id = FeatureId::new(&yaml.id)
        .map_err(|_| AppError::AssetError(format!("Invalid feature id '{}' in {}", yaml.id, path)))?;

    let inputs = yaml
        .inputs
        .into_iter()
        .map(|input| InputSpec {
            name: input.name,
            label: input.label,
            kind: if input.choices.is_empty() {
                InputKind::FreeText
            } else {
                InputKind::Choice(input.choices)
            },
        })
        .collect();

    let contract = build_contract(yaml.fields)
        .map_err(|err| AppError::AssetError(format!("Feature {}: {}", path, err)))?;

    FeatureDefinition::new(id, yaml.title, yaml.summary, inputs, yaml.template, contract)
}

fn build_contract(fields: Vec<FieldYaml>) -> Result<ResultContract, AppError> {
    fields
        .into_iter()
        .try_fold(ResultContract::builder(), |builder, field| -> Result<ContractBuilder, AppError> {
            Ok(match field {
                FieldYaml::Text { name, fallback } => builder.text(name, fallback),
                FieldYaml::List { name, fallback } => builder.list(name, fallback),
                FieldYaml::Record { name, fields } => builder.record(name, build_contract(fields)?),
            })
        })?
        .build()
}

fn collect_feature_files(dir: &'static Dir<'static>, files: &mut Vec<(String, &'static str)>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_string_lossy().to_string();
                if path.ends_with(".yml")
                    && let Some(content) = file.contents_utf8()
                {
                    files.push((path, content));
                }
            }
            DirEntry::Dir(subdir) => collect_feature_files(subdir, files),
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
