//! Optional read cache
//!
//! An id -> record memo owned by each collection handle, so two handles can
//! never share cache state. Entries are process-local and never persisted.
//! Reads populate lazily while enabled; every write or delete refreshes or
//! evicts the affected entry before the operation returns. There is no
//! eviction policy, TTL, or size bound.

use std::collections::HashMap;

use crate::store::Record;

/// Per-collection read cache with an explicit enabled/disabled state
#[derive(Debug, Default)]
pub struct ReadCache {
    enabled: bool,
    entries: HashMap<u64, Record>,
}

impl ReadCache {
    /// Disabled, empty cache
    pub fn new() -> Self {
        ReadCache::default()
    }

    /// Whether caching is currently on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns caching on; subsequent reads populate lazily.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turns caching off and discards all entries.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.entries.clear();
    }

    /// Discards all entries without changing the enabled state.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached snapshot for `id`, only while enabled.
    pub fn get(&self, id: u64) -> Option<&Record> {
        if !self.enabled {
            return None;
        }
        self.entries.get(&id)
    }

    /// Stores or refreshes the entry for a record, only while enabled.
    pub fn put(&mut self, record: &Record) {
        if self.enabled {
            self.entries.insert(record.id(), record.clone());
        }
    }

    /// Evicts the entry for `id`, if any.
    pub fn evict(&mut self, id: u64) {
        self.entries.remove(&id);
    }
}
