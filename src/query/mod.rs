//! Query Engine subsystem for shelfdb
//!
//! Resolves where-clauses to candidate id sets, then filters, sorts and
//! paginates in memory.
//!
//! # Invariants
//!
//! - Only the first where-clause entry, and only when it is a literal,
//!   is answered from the secondary index
//! - Ordered and wildcard predicates are evaluated strictly as post-filters
//!   over typed record values, never against stringified index keys
//! - Sorting is deterministic: natural value ordering with record id
//!   ascending as the tie-break
//! - Pagination applies strictly after sorting

mod engine;
mod filters;
mod predicate;
mod sorter;

pub use engine::{QueryEngine, RecordSource};
pub use filters::{like_matches, RecordFilter};
pub use predicate::{FilterOp, FindOptions, Predicate, SortOrder, Where};
pub use sorter::RecordSorter;
