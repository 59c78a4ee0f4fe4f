//! Transaction scoping for mvcs.
//!
//! The loader does not talk to a database directly; it only needs something
//! that can open, commit, and roll back a transaction around a unit of work.
//!
//! - [`TransactionManager`] — the begin/commit/rollback seam
//! - [`run_in_transaction`] — commit on `Ok`, roll back and propagate on `Err`
//! - [`SqliteTransactionManager`] — the bundled SQLite implementation
//!
//! # Example
//!
//! ```
//! use mvcs_db::{run_in_transaction, DbError, SqliteTransactionManager};
//!
//! # tokio_test_block_on(async {
//! let manager = SqliteTransactionManager::open_in_memory()?;
//! let conn = manager.connection();
//! run_in_transaction(&manager, || async {
//!     let conn = conn.lock().map_err(|_| DbError::LockPoisoned)?;
//!     conn.execute_batch("CREATE TABLE books (id INTEGER PRIMARY KEY)")?;
//!     Ok::<_, DbError>(())
//! })
//! .await?;
//! # Ok::<_, DbError>(())
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod error;
mod sqlite;
mod transaction;

pub use error::{DbError, DbResult};
pub use sqlite::SqliteTransactionManager;
pub use transaction::{TransactionManager, run_in_transaction};
