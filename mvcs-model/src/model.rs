use crate::association::{AssociationKind, AssociationOptions};
use crate::error::ModelResult;

/// The capability set the loader needs from a concrete ORM model.
///
/// During wiring the loader calls [`add_association`](Model::add_association)
/// on the source model and then
/// [`accept_association`](Model::accept_association) on the target, so an
/// implementation can keep foreign-key metadata on whichever side owns it.
/// The two calls never overlap, which keeps self-associations legal.
pub trait Model: Send + Sync {
    /// Unique name the model is registered under.
    fn name(&self) -> &str;

    /// Record an association edge from this model to `target`.
    fn add_association(
        &mut self,
        kind: AssociationKind,
        target: &str,
        options: &AssociationOptions,
    ) -> ModelResult<()>;

    /// Called on the target after `source` added an association to it.
    /// Default implementation does nothing.
    fn accept_association(
        &mut self,
        kind: AssociationKind,
        source: &str,
        options: &AssociationOptions,
    ) -> ModelResult<()> {
        let _ = (kind, source, options);
        Ok(())
    }
}
