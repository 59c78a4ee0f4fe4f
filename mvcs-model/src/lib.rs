//! Core model types for mvcs.
//!
//! Defines the types shared by the loader and by application code:
//! - [`AssociationKind`] — the four relationship categories and their default wiring order
//! - [`AssociationOptions`] — the opaque option bag handed to the ORM verbatim
//! - [`Model`] — the capability set the loader needs from a concrete model object
//! - [`ModelDefinition`] — the shipped `Model` implementation (attributes, foreign keys, edges)
//! - [`FieldError`] / [`ViolationBag`] — raw and normalized validation failures, and
//!   [`translate`] which maps one onto the other
//!
//! Nothing in this crate performs I/O.

mod association;
mod definition;
mod error;
mod model;
mod violation;

pub use association::{AssociationEdge, AssociationKind, AssociationOptions, Associations};
pub use definition::{Attribute, DataType, ModelDefinition, PRIMARY_KEY, Reference};
pub use error::{ModelError, ModelResult};
pub use model::Model;
pub use violation::{FieldError, Violation, ViolationBag, is_truthy, translate};
