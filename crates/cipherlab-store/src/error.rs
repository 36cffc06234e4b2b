//! Store errors.

use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage failure.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Record rejected before reaching the backend.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
