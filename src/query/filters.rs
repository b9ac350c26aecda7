//! Predicate evaluation over records
//!
//! Every predicate is applied as an AND-filter, including the one that may
//! already have narrowed the candidate set through the index. Equality is
//! exact with no type coercion; ordered operators compare numbers
//! numerically and strings lexicographically, and mixed types never match.
//! A missing field never satisfies any predicate.

use regex::RegexBuilder;
use serde_json::Value;

use crate::store::Record;

use super::predicate::{FilterOp, Predicate, Where};

/// Evaluates where-clauses against records
pub struct RecordFilter;

impl RecordFilter {
    /// Checks whether a record satisfies every entry of the clause
    pub fn matches(record: &Record, where_clause: &Where) -> bool {
        where_clause
            .entries()
            .iter()
            .all(|(field, predicate)| Self::matches_predicate(record, field, predicate))
    }

    fn matches_predicate(record: &Record, field: &str, predicate: &Predicate) -> bool {
        let Some(value) = record.get(field) else {
            return false;
        };

        match predicate {
            Predicate::Literal(expected) => value == expected,
            Predicate::Ops(ops) => ops.iter().all(|op| Self::matches_op(value, op)),
        }
    }

    fn matches_op(actual: &Value, op: &FilterOp) -> bool {
        match op {
            FilterOp::Eq(expected) => actual == expected,
            FilterOp::Ne(expected) => actual != expected,
            FilterOp::Gt(bound) => Self::ordered(actual, bound, |o| o.is_gt()),
            FilterOp::Gte(bound) => Self::ordered(actual, bound, |o| o.is_ge()),
            FilterOp::Lt(bound) => Self::ordered(actual, bound, |o| o.is_lt()),
            FilterOp::Lte(bound) => Self::ordered(actual, bound, |o| o.is_le()),
            FilterOp::In(values) => values.contains(actual),
            FilterOp::Nin(values) => !values.contains(actual),
            FilterOp::Like(pattern) => match actual {
                Value::String(text) => like_matches(text, pattern),
                _ => false,
            },
        }
    }

    /// Natural-ordering comparison: numeric for numbers, lexicographic for
    /// strings, no match for anything else or for mixed types.
    fn ordered(
        actual: &Value,
        bound: &Value,
        check: impl Fn(std::cmp::Ordering) -> bool,
    ) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                match (a.as_i64(), b.as_i64()) {
                    (Some(ai), Some(bi)) => check(ai.cmp(&bi)),
                    _ => match (a.as_f64(), b.as_f64()) {
                        (Some(af), Some(bf)) => {
                            af.partial_cmp(&bf).map(&check).unwrap_or(false)
                        }
                        _ => false,
                    },
                }
            }
            (Value::String(a), Value::String(b)) => check(a.cmp(b)),
            _ => false,
        }
    }
}

/// Case-insensitive wildcard match.
///
/// `%` matches zero or more of any character, including newlines. All other
/// regex metacharacters in the pattern are escaped, so user-supplied literal
/// text can never inject pattern syntax.
pub fn like_matches(text: &str, pattern: &str) -> bool {
    let escaped: Vec<String> = pattern.split('%').map(|part| regex::escape(part)).collect();
    let source = format!("^{}$", escaped.join(".*"));

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Record;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_fields(value.as_object().cloned().unwrap(), 1)
    }

    fn ops(ops: Vec<FilterOp>) -> Predicate {
        Predicate::Ops(ops)
    }

    #[test]
    fn test_literal_equality_no_coercion() {
        let rec = record(json!({"age": 30}));

        assert!(RecordFilter::matches(
            &rec,
            &Where::new().eq("age", 30)
        ));
        // String "30" must not match the number 30.
        assert!(!RecordFilter::matches(
            &rec,
            &Where::new().eq("age", "30")
        ));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let rec = record(json!({"name": "Alice"}));

        assert!(!RecordFilter::matches(&rec, &Where::new().eq("age", 30)));
        assert!(!RecordFilter::matches(
            &rec,
            &Where::new().field("age", ops(vec![FilterOp::Ne(json!(30))]))
        ));
    }

    #[test]
    fn test_range_operators() {
        let rec = record(json!({"age": 25}));

        let clause = Where::new().field(
            "age",
            ops(vec![FilterOp::Gte(json!(25)), FilterOp::Lte(json!(30))]),
        );
        assert!(RecordFilter::matches(&rec, &clause));

        let clause = Where::new().field("age", ops(vec![FilterOp::Gt(json!(25))]));
        assert!(!RecordFilter::matches(&rec, &clause));

        let clause = Where::new().field("age", ops(vec![FilterOp::Lt(json!(25))]));
        assert!(!RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_numeric_ordering_not_lexicographic() {
        // 9 < 10 numerically even though "9" > "10" lexically.
        let rec = record(json!({"n": 9}));
        let clause = Where::new().field("n", ops(vec![FilterOp::Lt(json!(10))]));
        assert!(RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_string_ordering_lexicographic() {
        let rec = record(json!({"name": "bob"}));
        let clause = Where::new().field("name", ops(vec![FilterOp::Gt(json!("alice"))]));
        assert!(RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_mixed_types_never_ordered() {
        let rec = record(json!({"age": 25}));
        let clause = Where::new().field("age", ops(vec![FilterOp::Gt(json!("1"))]));
        assert!(!RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_in_and_nin() {
        let rec = record(json!({"city": "Tokyo"}));

        let clause = Where::new().field(
            "city",
            ops(vec![FilterOp::In(vec![json!("Tokyo"), json!("Osaka")])]),
        );
        assert!(RecordFilter::matches(&rec, &clause));

        let clause = Where::new().field(
            "city",
            ops(vec![FilterOp::Nin(vec![json!("Tokyo"), json!("Osaka")])]),
        );
        assert!(!RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_like_substring_case_insensitive() {
        assert!(like_matches("张三丰", "%三%"));
        assert!(like_matches("Alice", "%ALI%"));
        assert!(like_matches("Alice", "alice"));
        assert!(!like_matches("Bob", "%三%"));
    }

    #[test]
    fn test_like_wildcard_positions() {
        assert!(like_matches("report.txt", "report%"));
        assert!(like_matches("report.txt", "%.txt"));
        assert!(like_matches("anything", "%"));
        assert!(!like_matches("report.txt", "txt"));
    }

    #[test]
    fn test_like_escapes_metacharacters() {
        // "." is literal, not "any character".
        assert!(!like_matches("axb", "a.b"));
        assert!(like_matches("a.b", "a.b"));
        // Bracket and repetition syntax stays literal too.
        assert!(like_matches("a[1]+", "a[1]+"));
        assert!(!like_matches("a1", "a[1]+"));
    }

    #[test]
    fn test_like_never_matches_non_text() {
        let rec = record(json!({"age": 30}));
        let clause = Where::new().field("age", ops(vec![FilterOp::Like("%3%".to_string())]));
        assert!(!RecordFilter::matches(&rec, &clause));
    }

    #[test]
    fn test_multiple_fields_and_semantics() {
        let rec = record(json!({"age": 25, "city": "Tokyo"}));

        let clause = Where::new()
            .eq("city", "Tokyo")
            .field("age", ops(vec![FilterOp::Gte(json!(18))]));
        assert!(RecordFilter::matches(&rec, &clause));

        let clause = Where::new()
            .eq("city", "Tokyo")
            .field("age", ops(vec![FilterOp::Gte(json!(30))]));
        assert!(!RecordFilter::matches(&rec, &clause));
    }
}
