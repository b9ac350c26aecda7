//! Record representation
//!
//! A record is a flat JSON field map carrying a positive integer `id`.
//! The `id` lives inside the map, exactly as it is persisted on disk.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat field map, the caller-facing shape of record data
pub type Fields = Map<String, Value>;

/// A stored record: a field map guaranteed to contain a positive integer `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Fields,
}

impl Record {
    /// Builds a record from caller data, stamping `id` into the field map.
    ///
    /// Any caller-supplied `id` field is overwritten with the given id so the
    /// map and the storage filename can never disagree.
    pub fn from_fields(mut fields: Fields, id: u64) -> Self {
        fields.insert("id".to_string(), Value::from(id));
        Record { fields }
    }

    /// Validates a deserialized field map as a record.
    ///
    /// Returns the reason on failure; used by the store to classify a
    /// malformed payload as corruption.
    pub fn from_stored(fields: Fields) -> Result<Self, String> {
        match fields.get("id").and_then(Value::as_u64) {
            Some(id) if id > 0 => Ok(Record { fields }),
            Some(_) => Err("record id must be positive".to_string()),
            None => Err("record payload missing integer id".to_string()),
        }
    }

    /// The record identifier
    pub fn id(&self) -> u64 {
        // Guaranteed by both constructors.
        self.fields
            .get("id")
            .and_then(Value::as_u64)
            .unwrap_or_default()
    }

    /// Field lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The full field map, `id` included
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Consumes the record, returning its field map
    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Returns a copy with `patch` merged over the existing fields.
    ///
    /// Patch fields override, others are retained, `id` always wins over
    /// anything the patch says.
    pub fn merged(&self, patch: &Fields) -> Record {
        let mut fields = self.fields.clone();
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        Record::from_fields(fields, self.id())
    }
}

/// Extracts a caller-supplied positive id from raw field data, if any
pub fn supplied_id(fields: &Fields) -> Option<u64> {
    fields.get("id").and_then(Value::as_u64).filter(|&id| id > 0)
}
