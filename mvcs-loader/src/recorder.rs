//! Declaration phase: the recorder handed to each model's `associate`
//! strategy, and the pending associations it collects.

use mvcs_model::{AssociationKind, AssociationOptions};
use tracing::debug;

/// An association that has been declared but not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAssociation {
    pub source: String,
    pub target: String,
    pub kind: AssociationKind,
    pub options: AssociationOptions,
}

/// Declarations grouped by kind, each group in declaration order.
#[derive(Debug, Default, Clone)]
pub struct PendingAssociations {
    by_kind: [Vec<PendingAssociation>; 4],
}

impl PendingAssociations {
    pub fn of(&self, kind: AssociationKind) -> &[PendingAssociation] {
        &self.by_kind[kind.index()]
    }

    /// All declarations, grouped by kind in [`AssociationKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingAssociation> {
        self.by_kind.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_kind.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, pending: PendingAssociation) {
        self.by_kind[pending.kind.index()].push(pending);
    }
}

/// Side-effect-free stand-in for the model registry during the declaration
/// phase.
///
/// A fresh recorder is bound to each model before its `associate` strategy
/// runs, so every declaration carries that model as its source. Nothing is
/// validated here; unknown targets are reported when wiring starts.
pub struct Recorder<'a> {
    source: &'a str,
    names: &'a [String],
    pending: &'a mut PendingAssociations,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(
        source: &'a str,
        names: &'a [String],
        pending: &'a mut PendingAssociations,
    ) -> Self {
        Self {
            source,
            names,
            pending,
        }
    }

    /// Name of the model whose associations are being declared.
    pub fn source(&self) -> &str {
        self.source
    }

    /// Every discovered model name, in discovery order, including the source.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Records an association of any kind from the source model to `target`.
    pub fn declare(
        &mut self,
        kind: AssociationKind,
        target: impl Into<String>,
        options: AssociationOptions,
    ) -> &mut Self {
        let target = target.into();
        debug!("declared {}.{}({})", self.source, kind, target);
        self.pending.push(PendingAssociation {
            source: self.source.to_string(),
            target,
            kind,
            options,
        });
        self
    }

    pub fn belongs_to(&mut self, target: impl Into<String>, options: AssociationOptions) -> &mut Self {
        self.declare(AssociationKind::BelongsTo, target, options)
    }

    pub fn has_one(&mut self, target: impl Into<String>, options: AssociationOptions) -> &mut Self {
        self.declare(AssociationKind::HasOne, target, options)
    }

    pub fn belongs_to_many(
        &mut self,
        target: impl Into<String>,
        options: AssociationOptions,
    ) -> &mut Self {
        self.declare(AssociationKind::BelongsToMany, target, options)
    }

    pub fn has_many(&mut self, target: impl Into<String>, options: AssociationOptions) -> &mut Self {
        self.declare(AssociationKind::HasMany, target, options)
    }
}
