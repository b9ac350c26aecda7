//! # Record Store Errors
//!
//! I/O failures and corrupt persisted state. A missing record is not an
//! error: read/update return `None` and delete returns `false`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage unreadable or unwritable
    #[error("storage i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed record payload on load; fatal, no automatic repair
    #[error("corrupt record payload at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Flag a record file as corrupt
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error denotes corrupt persisted state
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = StoreError::io(
            "/data/users/3.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{}", err);
        assert!(display.contains("/data/users/3.json"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_corrupt_is_corruption() {
        let err = StoreError::corrupt("/data/users/3.json", "missing id field");
        assert!(err.is_corruption());

        let err = StoreError::io(
            "/data/users/3.json",
            io::Error::new(io::ErrorKind::Other, "boom"),
        );
        assert!(!err.is_corruption());
    }
}
