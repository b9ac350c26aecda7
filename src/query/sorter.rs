//! Result sorting
//!
//! Single-field sort by natural value ordering with record id ascending as
//! the tie-break, so equal keys always come back in the same order.

use std::cmp::Ordering;

use serde_json::Value;

use crate::store::Record;

use super::predicate::SortOrder;

/// Sorts query results
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records by `field` in the given direction.
    ///
    /// Missing values sort before present ones; the id tie-break applies in
    /// the requested direction's ascending sense regardless of `order`.
    pub fn sort(records: &mut [Record], field: &str, order: SortOrder) {
        records.sort_by(|a, b| {
            let ordering = Self::compare_values(a.get(field), b.get(field));
            let ordering = match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id().cmp(&b.id()))
        });
    }

    /// Compares two optional JSON values.
    ///
    /// Absent < present; across types: null < bool < number < string <
    /// array < object; within a type, natural ordering.
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => {
                let rank = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                if rank(a) != rank(b) {
                    return rank(a).cmp(&rank(b));
                }

                match (a, b) {
                    (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                    (Value::Number(x), Value::Number(y)) => {
                        let xf = x.as_f64().unwrap_or(0.0);
                        let yf = y.as_f64().unwrap_or(0.0);
                        xf.partial_cmp(&yf).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(x), Value::String(y)) => x.cmp(y),
                    _ => Ordering::Equal,
                }
            }
        }
    }
}
