//! Database facade for shelfdb
//!
//! The public surface: open a store at a base path, open named collections,
//! and operate on records through a collection handle that keeps the store,
//! the secondary index, and the read cache consistent.

mod collection;
mod database;
mod errors;

pub use collection::Collection;
pub use database::Database;
pub use errors::{DbError, DbResult};
