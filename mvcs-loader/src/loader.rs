//! Two-phase association wiring.
//!
//! 1. **Discovery**: register every descriptor by name.
//! 2. **Declaration**: run each `associate` strategy against a [`Recorder`];
//!    nothing is mutated, declarations are only queued per kind.
//! 3. **Wiring**: replay the queue kind by kind in the configured order, so
//!    kinds that create shared keys (`belongsTo`, `hasOne`) run before kinds
//!    that only reference them (`hasMany`).
//!
//! Any failure aborts the whole load; the partially wired registry is
//! dropped, never returned.

use mvcs_db::TransactionManager;
use mvcs_model::{AssociationKind, Model};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{LoaderConfig, validate_kind_order};
use crate::database::Database;
use crate::descriptor::{AssociateFn, ModelDescriptor};
use crate::discovery::{IgnoreRule, list_model_files};
use crate::error::{LoaderError, LoaderResult};
use crate::import::{ModelImporter, TomlModelImporter};
use crate::recorder::{PendingAssociations, Recorder};
use crate::registry::{Registered, Registry};

/// Wires `entries` and wraps the result with transaction scoping.
pub fn load<M, I>(
    entries: I,
    kind_order: &[AssociationKind],
    transactions: Arc<dyn TransactionManager>,
) -> LoaderResult<Database<M>>
where
    M: Model,
    I: IntoIterator<Item = ModelDescriptor<M>>,
{
    let registry = wire(entries, kind_order)?;
    Ok(Database::new(registry, transactions))
}

/// Runs all three phases and returns the fully wired registry.
pub fn wire<M, I>(entries: I, kind_order: &[AssociationKind]) -> LoaderResult<Registry<M>>
where
    M: Model,
    I: IntoIterator<Item = ModelDescriptor<M>>,
{
    let (mut registry, strategies) = discover(entries);
    let pending = declare(&registry, &strategies);
    apply(&mut registry, &pending, kind_order)?;
    info!(
        "wired {} models with {} associations",
        registry.len(),
        pending.len()
    );
    Ok(registry)
}

fn discover<M, I>(entries: I) -> (Registry<M>, Vec<Option<AssociateFn>>)
where
    M: Model,
    I: IntoIterator<Item = ModelDescriptor<M>>,
{
    let mut registry = Registry::new();
    let mut strategies = Vec::new();

    for ModelDescriptor { model, associate } in entries {
        let name = model.name().to_string();
        match registry.insert(model) {
            Registered::New(_) => strategies.push(associate),
            Registered::Replaced(pos) => {
                warn!("model `{name}` registered twice, keeping the later definition");
                strategies[pos] = associate;
            }
        }
    }

    (registry, strategies)
}

/// Strategies are indexed by discovery position.
fn declare<M: Model>(registry: &Registry<M>, strategies: &[Option<AssociateFn>]) -> PendingAssociations {
    let names: Vec<String> = registry.names().map(str::to_string).collect();
    let mut pending = PendingAssociations::default();

    for (name, strategy) in names.iter().zip(strategies) {
        if let Some(associate) = strategy {
            let mut recorder = Recorder::new(name, &names, &mut pending);
            associate(&mut recorder);
        }
    }

    pending
}

fn apply<M: Model>(
    registry: &mut Registry<M>,
    pending: &PendingAssociations,
    kind_order: &[AssociationKind],
) -> LoaderResult<()> {
    validate_kind_order(kind_order)?;
    if let Some(kind) = AssociationKind::ALL
        .into_iter()
        .find(|k| !kind_order.contains(k) && !pending.of(*k).is_empty())
    {
        return Err(LoaderError::UnorderedKind(kind));
    }

    // fail before touching any model
    if let Some(p) = pending.iter().find(|p| !registry.contains(&p.target)) {
        return Err(LoaderError::UnknownModel {
            model: p.source.clone(),
            target: p.target.clone(),
            kind: p.kind,
        });
    }

    for &kind in kind_order {
        for p in pending.of(kind) {
            let association_error = |source| LoaderError::Association {
                model: p.source.clone(),
                target: p.target.clone(),
                kind,
                source,
            };
            let unknown = |name: &str| LoaderError::UnknownModel {
                model: p.source.clone(),
                target: name.to_string(),
                kind,
            };

            registry
                .get_mut(&p.source)
                .ok_or_else(|| unknown(&p.source))?
                .add_association(kind, &p.target, &p.options)
                .map_err(association_error)?;
            registry
                .get_mut(&p.target)
                .ok_or_else(|| unknown(&p.target))?
                .accept_association(kind, &p.source, &p.options)
                .map_err(association_error)?;

            debug!("applied {}.{}({})", p.source, kind, p.target);
        }
    }

    Ok(())
}

/// Loads every model file under a directory and wires the result.
pub struct ModelLoader<I> {
    config: LoaderConfig,
    importer: I,
    extra_ignore: Vec<IgnoreRule>,
}

impl ModelLoader<TomlModelImporter> {
    /// A loader reading TOML model files.
    pub fn toml(config: LoaderConfig) -> Self {
        Self::new(config, TomlModelImporter)
    }
}

impl<I: ModelImporter> ModelLoader<I> {
    pub fn new(config: LoaderConfig, importer: I) -> Self {
        Self {
            config,
            importer,
            extra_ignore: Vec::new(),
        }
    }

    /// Adds an ignore rule on top of the ones derived from the config.
    pub fn ignore(mut self, rule: IgnoreRule) -> Self {
        self.extra_ignore.push(rule);
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Model files that would be imported, in discovery order.
    pub fn discover(&self) -> LoaderResult<Vec<PathBuf>> {
        let mut rules = self.config.ignore_rules();
        rules.extend(self.extra_ignore.iter().cloned());
        list_model_files(&self.config.models_path, &rules)
    }

    /// Imports every discovered file and wires the models.
    pub fn load(&self, transactions: Arc<dyn TransactionManager>) -> LoaderResult<Database<I::Model>> {
        let files = self.discover()?;
        let descriptors = files
            .iter()
            .map(|path| self.importer.import(path))
            .collect::<LoaderResult<Vec<_>>>()?;
        info!(
            "imported {} model files from {}",
            descriptors.len(),
            self.config.models_path.display()
        );
        load(descriptors, &self.config.association_order, transactions)
    }
}
