//! Bulk operation aggregation
//!
//! Applies a single-item operation across a list, catching every per-item
//! failure locally. There is no rollback: earlier successful items remain
//! applied even when later items fail.

use serde::Serialize;

/// Message recorded when an update or delete targets an absent id
pub const NOT_FOUND_MESSAGE: &str = "Record not found";

/// One failed item of a bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkError {
    /// Position of the failed item in the input list
    pub index: usize,
    /// Failure message
    pub error: String,
}

/// Aggregate outcome of a bulk operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkResult {
    /// Items applied successfully
    pub success: usize,
    /// Items that failed
    pub failed: usize,
    /// Per-item failures, in input order
    pub errors: Vec<BulkError>,
}

impl BulkResult {
    fn record_success(&mut self) {
        self.success += 1;
    }

    fn record_failure(&mut self, index: usize, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(BulkError {
            index,
            error: error.into(),
        });
    }
}

/// Runs `apply` over every item, collecting per-item outcomes.
///
/// `apply` returns `Ok(true)` for success, `Ok(false)` for a not-found
/// outcome, and `Err` for any other failure; errors never escape.
pub fn run_bulk<T, E, F>(items: Vec<T>, mut apply: F) -> BulkResult
where
    E: std::fmt::Display,
    F: FnMut(T) -> Result<bool, E>,
{
    let mut result = BulkResult::default();
    for (index, item) in items.into_iter().enumerate() {
        match apply(item) {
            Ok(true) => result.record_success(),
            Ok(false) => result.record_failure(index, NOT_FOUND_MESSAGE),
            Err(e) => result.record_failure(index, e.to_string()),
        }
    }
    result
}
