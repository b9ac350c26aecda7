//! Secondary Index subsystem for shelfdb
//!
//! One index per collection: `field -> stringified value -> id set`,
//! covering every field unconditionally (full indexing, no declared-index
//! concept).
//!
//! # Design Principles
//!
//! - Derived state kept consistent with the record store after every
//!   completed mutation (not necessarily mid-operation)
//! - Persisted as one JSON document per collection under `_index/`
//! - Deterministic layout (BTree ordering throughout)
//! - String-keyed buckets serve equality lookups only; ordered predicates
//!   are never answered from the index

mod errors;
mod secondary;

pub use errors::{IndexError, IndexResult};
pub use secondary::{index_key, SecondaryIndex};
