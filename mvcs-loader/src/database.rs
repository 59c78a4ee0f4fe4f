use mvcs_db::{DbError, TransactionManager, run_in_transaction};
use mvcs_model::Model;
use std::future::Future;
use std::sync::Arc;

use crate::registry::Registry;

/// What a load hands back: the wired registry plus transaction scoping.
pub struct Database<M> {
    models: Arc<Registry<M>>,
    transactions: Arc<dyn TransactionManager>,
}

impl<M: Model> Database<M> {
    pub fn new(models: Registry<M>, transactions: Arc<dyn TransactionManager>) -> Self {
        Self {
            models: Arc::new(models),
            transactions,
        }
    }

    pub fn models(&self) -> &Registry<M> {
        &self.models
    }

    /// Shared handle to the registry for readers that outlive `self`.
    pub fn shared_models(&self) -> Arc<Registry<M>> {
        Arc::clone(&self.models)
    }

    pub fn model(&self, name: &str) -> Option<&M> {
        self.models.get(name)
    }

    /// Runs `work`, inside a transaction when `transactional` is true.
    ///
    /// Transactional work commits on `Ok` and rolls back on `Err`, returning
    /// the work's error unchanged. Non-transactional work is awaited
    /// directly; both paths yield the same future shape.
    pub async fn with_transaction<F, Fut, R, E>(&self, work: F, transactional: bool) -> Result<R, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<DbError>,
    {
        if transactional {
            run_in_transaction(self.transactions.as_ref(), work).await
        } else {
            work().await
        }
    }

    /// Shorthand for `with_transaction(work, true)`.
    pub async fn transaction<F, Fut, R, E>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<DbError>,
    {
        self.with_transaction(work, true).await
    }
}
