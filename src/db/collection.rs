//! Collection handle
//!
//! Owns the record store, the secondary index, and the read cache for one
//! named collection, and keeps them consistent across every operation.
//!
//! # Write flow (strict order)
//!
//! 1. Durable store write
//! 2. Index maintenance (remove stale associations, add current ones)
//! 3. Synchronous index persistence
//! 4. Cache refresh or eviction
//!
//! Single-writer by construction: the handle requires `&mut self` for every
//! operation that can touch the cache or the persisted state, and nothing
//! here is safe to share across processes.

use std::path::Path;

use crate::bulk::{run_bulk, BulkResult};
use crate::cache::ReadCache;
use crate::index::SecondaryIndex;
use crate::observability::Logger;
use crate::query::{FindOptions, QueryEngine, RecordSource, Where};
use crate::store::{supplied_id, Fields, Record, RecordStore, StoreResult};

use super::database::INDEX_DIR;
use super::errors::DbResult;

/// A named partition of records with its own storage namespace, secondary
/// index, and cache policy
#[derive(Debug)]
pub struct Collection {
    name: String,
    store: RecordStore,
    index: SecondaryIndex,
    cache: ReadCache,
}

/// Cache-aware read path handed to the query engine, so queries observe
/// exactly what single-record reads observe.
struct CachedReads<'a> {
    store: &'a RecordStore,
    cache: &'a mut ReadCache,
}

impl RecordSource for CachedReads<'_> {
    fn read(&mut self, id: u64) -> StoreResult<Option<Record>> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(Some(cached.clone()));
        }
        let record = self.store.read(id)?;
        if let Some(rec) = &record {
            self.cache.put(rec);
        }
        Ok(record)
    }

    fn all_ids(&self) -> StoreResult<Vec<u64>> {
        self.store.all_ids()
    }
}

impl Collection {
    /// Opens the collection, creating its directory on first use and
    /// loading its persisted index (empty if none exists yet).
    pub(crate) fn open(base: &Path, name: &str) -> DbResult<Self> {
        let store = RecordStore::open(base.join(name))?;
        let index = SecondaryIndex::open(&base.join(INDEX_DIR), name)?;

        Logger::info("COLLECTION_OPEN", &[("collection", name)]);
        Ok(Collection {
            name: name.to_string(),
            store,
            index,
            cache: ReadCache::new(),
        })
    }

    /// The collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a record, assigning the next id unless `fields` carries one.
    ///
    /// A caller-supplied id that already exists overwrites that record (last
    /// write wins); the previous version's index associations are dropped so
    /// the index never holds stale entries.
    pub fn create(&mut self, fields: Fields) -> DbResult<Record> {
        if let Some(id) = supplied_id(&fields) {
            if let Some(previous) = self.store.read(id)? {
                self.index.remove_record(previous.fields(), id);
            }
        }

        let record = self.store.create(fields)?;
        self.index.add_record(record.fields(), record.id());
        self.index.save()?;
        self.cache.put(&record);

        Logger::debug(
            "RECORD_CREATE",
            &[
                ("collection", &self.name),
                ("id", &record.id().to_string()),
            ],
        );
        Ok(record)
    }

    /// Returns the latest version of the record, or `None` if absent.
    /// Served from the cache when enabled and present.
    pub fn read(&mut self, id: u64) -> DbResult<Option<Record>> {
        let mut reads = CachedReads {
            store: &self.store,
            cache: &mut self.cache,
        };
        Ok(reads.read(id)?)
    }

    /// Merges `patch` over the existing record. `None` if the id is absent.
    pub fn update(&mut self, id: u64, patch: &Fields) -> DbResult<Option<Record>> {
        let Some(previous) = self.store.read(id)? else {
            return Ok(None);
        };

        let updated = self.store.update_existing(&previous, patch)?;
        self.index.remove_record(previous.fields(), id);
        self.index.add_record(updated.fields(), id);
        self.index.save()?;
        self.cache.put(&updated);

        Logger::debug(
            "RECORD_UPDATE",
            &[("collection", &self.name), ("id", &id.to_string())],
        );
        Ok(Some(updated))
    }

    /// Removes the record. `false` if the id was absent.
    pub fn delete(&mut self, id: u64) -> DbResult<bool> {
        let Some(previous) = self.store.read(id)? else {
            return Ok(false);
        };

        self.store.delete(id)?;
        self.index.remove_record(previous.fields(), id);
        self.index.save()?;
        self.cache.evict(id);

        Logger::debug(
            "RECORD_DELETE",
            &[("collection", &self.name), ("id", &id.to_string())],
        );
        Ok(true)
    }

    /// Runs a query: filter, sort, paginate.
    pub fn find_all(&mut self, options: &FindOptions) -> DbResult<Vec<Record>> {
        let mut reads = CachedReads {
            store: &self.store,
            cache: &mut self.cache,
        };
        Ok(QueryEngine::find_all(&mut reads, &self.index, options)?)
    }

    /// Runs a query with an implicit limit of one.
    pub fn find_one(&mut self, options: &FindOptions) -> DbResult<Option<Record>> {
        let mut reads = CachedReads {
            store: &self.store,
            cache: &mut self.cache,
        };
        Ok(QueryEngine::find_one(&mut reads, &self.index, options)?)
    }

    /// Number of records matching `where_clause`. Always materializes the
    /// matching records; there is no index-only shortcut.
    pub fn count(&mut self, where_clause: Where) -> DbResult<usize> {
        let options = FindOptions::new().where_clause(where_clause);
        Ok(self.find_all(&options)?.len())
    }

    /// Creates every item, collecting per-item outcomes. No rollback.
    pub fn bulk_create(&mut self, items: Vec<Fields>) -> BulkResult {
        run_bulk(items, |fields| self.create(fields).map(|_| true))
    }

    /// Applies every `(id, patch)` pair. An absent id counts as a failure.
    pub fn bulk_update(&mut self, items: Vec<(u64, Fields)>) -> BulkResult {
        run_bulk(items, |(id, patch)| {
            self.update(id, &patch).map(|updated| updated.is_some())
        })
    }

    /// Deletes every id. An absent id counts as a failure.
    pub fn bulk_delete(&mut self, ids: Vec<u64>) -> BulkResult {
        run_bulk(ids, |id| self.delete(id))
    }

    /// Turns on the read cache for this handle.
    pub fn enable_cache(&mut self) {
        self.cache.enable();
    }

    /// Turns off the read cache and discards all entries.
    pub fn disable_cache(&mut self) {
        self.cache.disable();
    }

    /// Discards all cache entries without changing the enabled state.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
