use async_trait::async_trait;
use std::future::Future;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Something that can scope a unit of work in a transaction.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> DbResult<()>;

    async fn commit(&self) -> DbResult<()>;

    async fn rollback(&self) -> DbResult<()>;
}

/// Runs `work` inside a transaction opened on `manager`.
///
/// Commits when `work` returns `Ok`. When it returns `Err` the transaction is
/// rolled back and the work's own error is returned unchanged; a failing
/// rollback is logged, never surfaced in its place. A failing commit is
/// rolled back and returned as `E::from(DbError)`.
pub async fn run_in_transaction<M, F, Fut, R, E>(manager: &M, work: F) -> Result<R, E>
where
    M: TransactionManager + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: From<DbError>,
{
    manager.begin().await?;
    debug!("transaction opened");

    match work().await {
        Ok(value) => {
            if let Err(commit_err) = manager.commit().await {
                if let Err(e) = manager.rollback().await {
                    warn!("rollback after failed commit also failed: {e}");
                }
                return Err(commit_err.into());
            }
            debug!("transaction committed");
            Ok(value)
        }
        Err(err) => {
            match manager.rollback().await {
                Ok(()) => debug!("transaction rolled back"),
                Err(e) => warn!("rollback failed: {e}"),
            }
            Err(err)
        }
    }
}
