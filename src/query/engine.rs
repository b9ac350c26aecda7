//! Query execution
//!
//! # Execution Flow (strict order)
//!
//! 1. Choose candidate ids: index lookup when the first where-clause entry
//!    is a literal, otherwise a full enumeration of the collection
//! 2. Read candidate records through the collection's read path
//! 3. Apply every predicate as an AND post-filter (the index-assisted one
//!    redundantly; ranges and wildcards are never pushed into the index)
//! 4. Apply the optional single-field sort
//! 5. Apply offset, then limit

use crate::index::SecondaryIndex;
use crate::store::{Record, StoreResult};

use super::filters::RecordFilter;
use super::predicate::{FindOptions, Predicate};
use super::sorter::RecordSorter;

/// Source of records for query execution.
///
/// The collection handle implements this over its cache-aware read path, so
/// queries see exactly what single-record reads see.
pub trait RecordSource {
    /// Reads one record by id (`None` if not live)
    fn read(&mut self, id: u64) -> StoreResult<Option<Record>>;

    /// Enumerates every live id, sorted ascending
    fn all_ids(&self) -> StoreResult<Vec<u64>>;
}

/// Resolves queries against a record source and its secondary index
pub struct QueryEngine;

impl QueryEngine {
    /// Runs a full query: candidates, filter, sort, paginate.
    pub fn find_all<S: RecordSource>(
        source: &mut S,
        index: &SecondaryIndex,
        options: &FindOptions,
    ) -> StoreResult<Vec<Record>> {
        let candidates = Self::candidate_ids(source, index, options)?;

        let mut results = Vec::new();
        for id in candidates {
            let Some(record) = source.read(id)? else {
                // Stale index entry or a record deleted mid-enumeration.
                continue;
            };
            if RecordFilter::matches(&record, &options.where_clause) {
                results.push(record);
            }
        }

        if let Some(field) = &options.order_by {
            RecordSorter::sort(&mut results, field, options.order);
        }

        if options.offset > 0 {
            results.drain(..options.offset.min(results.len()));
        }
        if let Some(limit) = options.limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    /// Runs the query with an implicit limit of one.
    pub fn find_one<S: RecordSource>(
        source: &mut S,
        index: &SecondaryIndex,
        options: &FindOptions,
    ) -> StoreResult<Option<Record>> {
        let mut limited = options.clone();
        limited.limit = Some(1);
        Ok(Self::find_all(source, index, &limited)?.into_iter().next())
    }

    /// Candidate id set per the resolution rules.
    fn candidate_ids<S: RecordSource>(
        source: &mut S,
        index: &SecondaryIndex,
        options: &FindOptions,
    ) -> StoreResult<Vec<u64>> {
        match options.where_clause.first() {
            // Index assistance applies to the first literal entry only.
            Some((field, Predicate::Literal(value))) => {
                Ok(index.find(field, value).into_iter().collect())
            }
            // Operator sets fall back to a full scan.
            Some((_, Predicate::Ops(_))) => source.all_ids(),
            None => source.all_ids(),
        }
    }
}
