//! SQLite-backed transaction manager.

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{DbError, DbResult};
use crate::transaction::TransactionManager;

/// Issues `BEGIN` / `COMMIT` / `ROLLBACK` on a shared SQLite connection.
///
/// The unit of work reaches the same connection through
/// [`connection`](Self::connection).
#[derive(Clone)]
pub struct SqliteTransactionManager {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTransactionManager {
    /// Opens (or creates) a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Opens an in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Shared handle to the underlying connection.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    /// Whether a transaction is currently open.
    pub fn in_transaction(&self) -> DbResult<bool> {
        Ok(!self.lock()?.is_autocommit())
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }
}

#[async_trait]
impl TransactionManager for SqliteTransactionManager {
    async fn begin(&self) -> DbResult<()> {
        let conn = self.lock()?;
        if !conn.is_autocommit() {
            return Err(DbError::TransactionActive);
        }
        conn.execute_batch("BEGIN")?;
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        let conn = self.lock()?;
        if conn.is_autocommit() {
            return Err(DbError::NoActiveTransaction);
        }
        conn.execute_batch("COMMIT")?;
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        let conn = self.lock()?;
        if conn.is_autocommit() {
            return Err(DbError::NoActiveTransaction);
        }
        conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}
