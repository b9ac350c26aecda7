//! # Database Errors
//!
//! Unified error surface over the store and index subsystems.

use thiserror::Error;

use crate::index::IndexError;
use crate::store::StoreError;

/// Result type for database-level operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors surfaced by the database facade
#[derive(Debug, Error)]
pub enum DbError {
    /// Record store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Secondary index failure
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Collection name is empty, reserved, or contains path separators
    #[error("invalid collection name: {0:?}")]
    InvalidCollectionName(String),
}

impl DbError {
    /// Whether this error denotes corrupt persisted state
    pub fn is_corruption(&self) -> bool {
        match self {
            DbError::Store(e) => e.is_corruption(),
            DbError::Index(e) => e.is_corruption(),
            DbError::InvalidCollectionName(_) => false,
        }
    }
}
