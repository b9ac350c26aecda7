//! # Secondary Index Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Secondary index errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// Index file unreadable or unwritable
    #[error("index i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed persisted index; fatal at collection open, never rebuilt
    #[error("corrupt index file at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

impl IndexError {
    /// Wrap an I/O error with the index file path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }

    /// Flag the persisted index as corrupt
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IndexError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error denotes corrupt persisted state
    pub fn is_corruption(&self) -> bool {
        matches!(self, IndexError::Corrupt { .. })
    }
}
