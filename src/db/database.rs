//! Store bootstrap
//!
//! Creates the base directory and the reserved `_index` subdirectory on
//! open, then hands out collection handles.

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::Logger;
use crate::store::StoreError;

use super::collection::Collection;
use super::errors::{DbError, DbResult};

/// Subdirectory holding one persisted index file per collection
pub(crate) const INDEX_DIR: &str = "_index";

/// Entry point: a store rooted at a base directory
pub struct Database {
    base: PathBuf,
}

impl Database {
    /// Opens a store at `base`, creating the directory layout if absent.
    /// Idempotent: opening an existing store is a no-op on disk.
    pub fn open(base: impl Into<PathBuf>) -> DbResult<Self> {
        let base = base.into();

        fs::create_dir_all(&base).map_err(|e| StoreError::io(&base, e))?;
        let index_dir = base.join(INDEX_DIR);
        fs::create_dir_all(&index_dir).map_err(|e| StoreError::io(&index_dir, e))?;

        Logger::info("STORE_OPEN", &[("base", &base.display().to_string())]);
        Ok(Database { base })
    }

    /// The base directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Opens (defining on first use) a named collection.
    ///
    /// Loads the collection's persisted index; a present but malformed
    /// index file fails here, it is never rebuilt from the records.
    pub fn collection(&self, name: &str) -> DbResult<Collection> {
        if !valid_collection_name(name) {
            return Err(DbError::InvalidCollectionName(name.to_string()));
        }
        Collection::open(&self.base, name)
    }
}

/// Collection names become directory names, so they must be plain,
/// non-reserved path components.
fn valid_collection_name(name: &str) -> bool {
    !name.is_empty()
        && name != INDEX_DIR
        && !name.starts_with('.')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
