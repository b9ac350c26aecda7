//! Per-collection secondary index
//!
//! Maps `field -> stringified value -> set of record ids`, covering every
//! field of every record. BTree containers keep the persisted layout
//! deterministic: the same contents always serialize to the same bytes.
//!
//! The index is loaded once when a collection opens and written back as a
//! whole after every mutating operation, so persistence cost scales with
//! total index size rather than with the size of the change.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{IndexError, IndexResult};

/// Nested bucket structure, also the persisted JSON shape
type Buckets = BTreeMap<String, BTreeMap<String, BTreeSet<u64>>>;

/// In-memory + persisted secondary index for one collection
#[derive(Debug)]
pub struct SecondaryIndex {
    file: PathBuf,
    buckets: Buckets,
}

/// Normalizes a field value to its index key.
///
/// Strings index by their raw text; every other value by its compact JSON
/// text. Distinct types therefore share a bucket only when their text forms
/// collide (e.g. the string "5" and the number 5), matching equality on the
/// stringified form.
pub fn index_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl SecondaryIndex {
    /// Loads the index for `collection` from `<index_dir>/<collection>.json`.
    ///
    /// An absent file yields an empty index. A present but malformed file is
    /// a fatal corruption error; the index is never rebuilt from records.
    pub fn open(index_dir: &Path, collection: &str) -> IndexResult<Self> {
        let file = index_dir.join(format!("{}.json", collection));

        let buckets = if file.exists() {
            let text = fs::read_to_string(&file).map_err(|e| IndexError::io(&file, e))?;
            serde_json::from_str(&text)
                .map_err(|e| IndexError::corrupt(&file, format!("invalid json: {}", e)))?
        } else {
            Buckets::new()
        };

        Ok(SecondaryIndex { file, buckets })
    }

    /// Inserts `id` into the `(field, value)` bucket. Idempotent.
    pub fn add(&mut self, field: &str, value: &Value, id: u64) {
        self.buckets
            .entry(field.to_string())
            .or_default()
            .entry(index_key(value))
            .or_default()
            .insert(id);
    }

    /// Removes `id` from the `(field, value)` bucket, dropping the bucket
    /// once empty and the field map once it holds no buckets.
    pub fn remove(&mut self, field: &str, value: &Value, id: u64) {
        let key = index_key(value);
        let Some(values) = self.buckets.get_mut(field) else {
            return;
        };
        if let Some(ids) = values.get_mut(&key) {
            ids.remove(&id);
            if ids.is_empty() {
                values.remove(&key);
            }
        }
        if values.is_empty() {
            self.buckets.remove(field);
        }
    }

    /// Returns the ids in the `(field, value)` bucket, empty if absent.
    pub fn find(&self, field: &str, value: &Value) -> BTreeSet<u64> {
        self.buckets
            .get(field)
            .and_then(|values| values.get(&index_key(value)))
            .cloned()
            .unwrap_or_default()
    }

    /// Adds every field of `record_fields` for `id`.
    pub fn add_record(&mut self, record_fields: &serde_json::Map<String, Value>, id: u64) {
        for (field, value) in record_fields {
            self.add(field, value, id);
        }
    }

    /// Removes every field of `record_fields` for `id`.
    pub fn remove_record(&mut self, record_fields: &serde_json::Map<String, Value>, id: u64) {
        for (field, value) in record_fields {
            self.remove(field, value, id);
        }
    }

    /// Serializes the entire index to its file, flushed before returning.
    pub fn save(&self) -> IndexResult<()> {
        let text = serde_json::to_string_pretty(&self.buckets)
            .map_err(|e| IndexError::corrupt(&self.file, format!("unserializable index: {}", e)))?;

        let mut file = File::create(&self.file).map_err(|e| IndexError::io(&self.file, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| IndexError::io(&self.file, e))?;
        file.sync_all().map_err(|e| IndexError::io(&self.file, e))?;
        Ok(())
    }

    /// True when no bucket holds any id
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
