//! shelfdb - an embedded, file-backed record store
//!
//! Each collection persists records as individually addressable JSON files,
//! with a secondary index accelerating field-equality lookup. Queries
//! filter, sort, and paginate in memory; bulk operations aggregate per-item
//! outcomes without rollback.
//!
//! Single-process, single-writer by design: every operation is synchronous
//! and durable before it returns, and nothing is safe to share across
//! processes.
//!
//! ```no_run
//! use serde_json::json;
//! use shelfdb::{Database, FindOptions, SortOrder, Where};
//!
//! # fn main() -> shelfdb::DbResult<()> {
//! let db = Database::open("./data")?;
//! let mut users = db.collection("users")?;
//!
//! users.create(json!({"name": "Alice", "age": 30}).as_object().cloned().unwrap())?;
//!
//! let adults = users.find_all(
//!     &FindOptions::new()
//!         .where_clause(Where::new().eq("name", "Alice"))
//!         .order_by("age", SortOrder::Desc)
//!         .limit(10),
//! )?;
//! # let _ = adults;
//! # Ok(())
//! # }
//! ```

pub mod bulk;
pub mod cache;
pub mod db;
pub mod index;
pub mod observability;
pub mod query;
pub mod store;

pub use bulk::{BulkError, BulkResult};
pub use db::{Collection, Database, DbError, DbResult};
pub use query::{FilterOp, FindOptions, Predicate, SortOrder, Where};
pub use store::{Fields, Record};
