//! Turning a model file into a [`ModelDescriptor`].

use mvcs_model::{
    AssociationKind, AssociationOptions, Attribute, Model, ModelDefinition, PRIMARY_KEY,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::descriptor::ModelDescriptor;
use crate::error::{LoaderError, LoaderResult};

/// Loads one model file.
pub trait ModelImporter {
    type Model: Model;

    fn import(&self, path: &Path) -> LoaderResult<ModelDescriptor<Self::Model>>;
}

/// Reads `*.toml` model files into [`ModelDefinition`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlModelImporter;

impl ModelImporter for TomlModelImporter {
    type Model = ModelDefinition;

    fn import(&self, path: &Path) -> LoaderResult<ModelDescriptor<ModelDefinition>> {
        let text = fs::read_to_string(path)?;
        let file: ModelFile = toml::from_str(&text).map_err(|source| LoaderError::InvalidModelFile {
            path: path.to_path_buf(),
            source,
        })?;
        file.into_descriptor(&model_name_from_path(path))
    }
}

/// On-disk layout of a model file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    pub name: Option<String>,
    pub table: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub associations: Vec<DeclaredAssociation>,
}

/// One `[[associations]]` entry of a model file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredAssociation {
    pub kind: AssociationKind,
    pub target: String,
    #[serde(default)]
    pub options: AssociationOptions,
}

impl ModelFile {
    /// Builds the definition; `default_name` is used when the file has no
    /// `name`. Declared associations are replayed, in file order, by the
    /// descriptor's `associate` strategy.
    pub fn into_descriptor(self, default_name: &str) -> LoaderResult<ModelDescriptor<ModelDefinition>> {
        let name = self.name.unwrap_or_else(|| default_name.to_string());
        let mut definition = ModelDefinition::new(name);
        if let Some(table) = self.table {
            definition = definition.with_table(table);
        }

        for attribute in self.attributes {
            if attribute.name == PRIMARY_KEY {
                // an explicit id replaces the implicit one
                definition.attributes.retain(|a| a.name != PRIMARY_KEY);
            }
            definition
                .add_attribute(attribute)
                .map_err(|source| LoaderError::Model {
                    model: definition.name.clone(),
                    source,
                })?;
        }

        let descriptor = ModelDescriptor::new(definition);
        if self.associations.is_empty() {
            return Ok(descriptor);
        }

        let associations = self.associations;
        Ok(descriptor.with_associate(move |recorder| {
            for a in &associations {
                recorder.declare(a.kind, a.target.clone(), a.options.clone());
            }
        }))
    }
}

/// `models/book.model.toml` -> `Book`.
pub fn model_name_from_path(path: &Path) -> String {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
