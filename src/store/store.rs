//! Durable unit-per-id storage for a named collection
//!
//! One directory per collection, one `<id>.json` file per live record.
//! Every write is synchronous and flushed before the call returns; there is
//! no buffering and no background I/O.
//!
//! Id allocation uses a persisted monotonic counter (`_counter` file in the
//! collection directory). When the counter file is absent, for example for
//! data written by an earlier layout, the store falls back to a max-id scan
//! and seeds the counter from it.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{supplied_id, Fields, Record};

/// Filename of the per-collection id allocation counter
const COUNTER_FILE: &str = "_counter";

/// File-backed record storage for one collection
#[derive(Debug)]
pub struct RecordStore {
    dir: PathBuf,
    /// Last allocated id; `None` until loaded or first needed
    counter: Option<u64>,
}

impl RecordStore {
    /// Opens (creating if absent) the storage directory for a collection.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let counter = Self::load_counter(&dir)?;
        Ok(RecordStore { dir, counter })
    }

    /// The storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn counter_path(dir: &Path) -> PathBuf {
        dir.join(COUNTER_FILE)
    }

    fn load_counter(dir: &Path) -> StoreResult<Option<u64>> {
        let path = Self::counter_path(dir);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let value = text
            .trim()
            .parse::<u64>()
            .map_err(|_| StoreError::corrupt(&path, "counter is not an integer"))?;
        Ok(Some(value))
    }

    /// Writes bytes and flushes them to disk before returning.
    fn write_durable(path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let mut file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        file.write_all(bytes).map_err(|e| StoreError::io(path, e))?;
        file.sync_all().map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }

    fn persist_counter(&mut self, value: u64) -> StoreResult<()> {
        let path = Self::counter_path(&self.dir);
        Self::write_durable(&path, value.to_string().as_bytes())?;
        self.counter = Some(value);
        Ok(())
    }

    /// Highest id ever allocated: the counter, or a max-id scan when no
    /// counter has ever been persisted for this collection.
    fn last_allocated(&self) -> StoreResult<u64> {
        match self.counter {
            Some(value) => Ok(value),
            None => Ok(self.all_ids()?.last().copied().unwrap_or(0)),
        }
    }

    /// Creates a record, persisting it synchronously.
    ///
    /// A caller-supplied positive integer `id` in `fields` is honored
    /// without uniqueness enforcement: a colliding id overwrites the
    /// existing record (last write wins).
    pub fn create(&mut self, fields: Fields) -> StoreResult<Record> {
        // Resolved before the write even for explicit ids: the counter
        // must stay ahead of every live id, so a create under the
        // missing-counter fallback seeds it from the scan, never from a
        // low supplied id.
        let last = self.last_allocated()?;
        let id = supplied_id(&fields).unwrap_or(last + 1);

        let record = Record::from_fields(fields, id);
        self.write_record(&record)?;
        self.persist_counter(last.max(id))?;

        Ok(record)
    }

    /// Returns the exact last-written record, or `None` if the id is absent.
    pub fn read(&self, id: u64) -> StoreResult<Option<Record>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let fields: Fields = serde_json::from_str(&text)
            .map_err(|e| StoreError::corrupt(&path, format!("invalid json: {}", e)))?;
        let record =
            Record::from_stored(fields).map_err(|reason| StoreError::corrupt(&path, reason))?;
        Ok(Some(record))
    }

    /// Merges `patch` over the existing record and re-persists it.
    ///
    /// Returns `None` without touching storage when the id is absent.
    pub fn update(&mut self, id: u64, patch: &Fields) -> StoreResult<Option<Record>> {
        let Some(existing) = self.read(id)? else {
            return Ok(None);
        };
        Ok(Some(self.update_existing(&existing, patch)?))
    }

    /// Merges `patch` over a record the caller already holds and
    /// re-persists it, skipping the read that `update` would repeat.
    pub fn update_existing(&mut self, existing: &Record, patch: &Fields) -> StoreResult<Record> {
        let updated = existing.merged(patch);
        self.write_record(&updated)?;
        Ok(updated)
    }

    /// Removes the storage unit for `id`. Returns `false` if it was absent.
    pub fn delete(&mut self, id: u64) -> StoreResult<bool> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        Ok(true)
    }

    /// Enumerates the ids of all live records, sorted ascending.
    ///
    /// Sorted output keeps full scans deterministic.
    pub fn all_ids(&self) -> StoreResult<Vec<u64>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            if let Ok(id) = stem.parse::<u64>() {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    fn write_record(&self, record: &Record) -> StoreResult<()> {
        let path = self.record_path(record.id());
        let text = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::corrupt(&path, format!("unserializable record: {}", e)))?;
        Self::write_durable(&path, text.as_bytes())
    }
}
