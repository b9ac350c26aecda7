//! Record Store subsystem for shelfdb
//!
//! Durable unit-per-id storage: one directory per collection, one JSON file
//! per live record, named by its id.
//!
//! # Design Principles
//!
//! - Synchronous durable writes (flush before return, no buffering)
//! - NotFound is a sentinel (`Option` / `bool`), never an error
//! - Monotonic persisted id counter, max-id scan fallback for migrated data
//! - Malformed payloads fail loudly as corruption, no automatic repair

mod errors;
mod record;
mod store;

pub use errors::{StoreError, StoreResult};
pub use record::{supplied_id, Fields, Record};
pub use store::RecordStore;
