//! Loader configuration.

use mvcs_model::AssociationKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::IgnoreRule;
use crate::error::{LoaderError, LoaderResult};

/// Where model files live and how they are wired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Directory scanned for model files.
    pub models_path: PathBuf,
    /// Files to skip, relative to `models_path`.
    pub ignore: Vec<PathBuf>,
    /// When set, only files whose name ends with this suffix are loaded.
    pub model_suffix: Option<String>,
    /// Kinds in the order their associations are applied.
    pub association_order: Vec<AssociationKind>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            models_path: PathBuf::from("models"),
            ignore: Vec::new(),
            model_suffix: None,
            association_order: AssociationKind::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl LoaderConfig {
    pub fn from_toml_str(s: &str) -> LoaderResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| LoaderError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> LoaderResult<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> LoaderResult<()> {
        validate_kind_order(&self.association_order)
    }

    /// Ignore rules for discovery: one literal per `ignore` entry, plus the
    /// suffix requirement when `model_suffix` is set.
    pub fn ignore_rules(&self) -> Vec<IgnoreRule> {
        let mut rules: Vec<IgnoreRule> = self.ignore.iter().cloned().map(IgnoreRule::Literal).collect();
        if let Some(suffix) = &self.model_suffix {
            rules.push(IgnoreRule::require_suffix(suffix.clone()));
        }
        rules
    }
}

/// Rejects orders that list a kind more than once.
pub fn validate_kind_order(order: &[AssociationKind]) -> LoaderResult<()> {
    let mut seen = [false; 4];
    for kind in order {
        if std::mem::replace(&mut seen[kind.index()], true) {
            return Err(LoaderError::DuplicateKind(*kind));
        }
    }
    Ok(())
}
