//! Model loading and association wiring for mvcs.
//!
//! Discovers model files in a directory, imports them, and wires every
//! declared association exactly once, kind by kind, in a configurable order.
//!
//! # Architecture
//!
//! - **Discovery**: [`list_model_files`] walks the models directory and drops
//!   files matched by any [`IgnoreRule`]
//! - **Import**: a [`ModelImporter`] turns each file into a [`ModelDescriptor`]
//!   (a model plus an optional `associate` strategy)
//! - **Declaration**: each strategy runs against a [`Recorder`] that only
//!   queues [`PendingAssociation`]s
//! - **Wiring**: the queue is replayed per [`AssociationKind`] in the
//!   configured order onto the real models
//! - **Exposure**: the wired [`Registry`] is returned inside a [`Database`]
//!   that also scopes work in transactions
//!
//! # Example
//!
//! ```
//! use mvcs_loader::{wire, ModelDescriptor};
//! use mvcs_model::{AssociationKind, AssociationOptions, ModelDefinition};
//!
//! let author = ModelDescriptor::new(ModelDefinition::new("Author")).with_associate(|r| {
//!     r.has_many("Book", AssociationOptions::with_alias("books"));
//! });
//! let book = ModelDescriptor::new(ModelDefinition::new("Book")).with_associate(|r| {
//!     r.belongs_to("Author", AssociationOptions::with_alias("author"));
//! });
//!
//! let models = wire([author, book], &AssociationKind::DEFAULT_ORDER).unwrap();
//! assert_eq!(models["Author"].associations.has_many.len(), 1);
//! assert!(models["Book"].attribute("authorId").is_some());
//! ```

mod config;
mod database;
mod descriptor;
mod discovery;
mod error;
mod import;
mod loader;
mod recorder;
mod registry;

pub use config::{LoaderConfig, validate_kind_order};
pub use database::Database;
pub use descriptor::{AssociateFn, ModelDescriptor};
pub use discovery::{IgnoreRule, list_model_files};
pub use error::{LoaderError, LoaderResult};
pub use import::{DeclaredAssociation, ModelFile, ModelImporter, TomlModelImporter, model_name_from_path};
pub use loader::{ModelLoader, load, wire};
pub use recorder::{PendingAssociation, PendingAssociations, Recorder};
pub use registry::Registry;

pub use mvcs_model::AssociationKind;
