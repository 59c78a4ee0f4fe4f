//! Error types for the transaction layer.

use thiserror::Error;

/// Result type for transaction operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur while opening, committing, or rolling back a
/// transaction.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A thread panicked while holding the connection.
    #[error("connection lock poisoned")]
    LockPoisoned,

    /// `begin` was called while a transaction is already open.
    #[error("a transaction is already active")]
    TransactionActive,

    /// `commit` or `rollback` was called with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,
}
