//! Where-clause shapes and query options
//!
//! A where-clause maps field names to predicates. A predicate is either a
//! literal (exact equality, eligible for index assistance when it is the
//! first entry) or a set of filter operators, which always evaluate as a
//! post-filter over candidate records.
//!
//! Entry order is significant: only the FIRST entry of a where-clause can be
//! answered from the secondary index, so the clause is kept as an ordered
//! list rather than a map.

use serde_json::Value;

/// A single filter operator inside a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Exact equality
    Eq(Value),
    /// Inequality
    Ne(Value),
    /// Strictly greater (natural ordering)
    Gt(Value),
    /// Greater or equal
    Gte(Value),
    /// Strictly less
    Lt(Value),
    /// Less or equal
    Lte(Value),
    /// Membership in a value list
    In(Vec<Value>),
    /// Non-membership in a value list
    Nin(Vec<Value>),
    /// Case-insensitive wildcard match; `%` matches zero or more of any
    /// character, everything else is literal. Only text values match.
    Like(String),
}

/// A per-field condition in a where-clause
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Literal equality; index-assisted when first in the clause
    Literal(Value),
    /// Operator set; never index-assisted
    Ops(Vec<FilterOp>),
}

impl Predicate {
    /// Literal equality predicate
    pub fn literal(value: impl Into<Value>) -> Self {
        Predicate::Literal(value.into())
    }

    /// Operator-set predicate
    pub fn ops(ops: impl Into<Vec<FilterOp>>) -> Self {
        Predicate::Ops(ops.into())
    }
}

/// Ordered where-clause: `(field, predicate)` pairs, AND semantics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    entries: Vec<(String, Predicate)>,
}

impl Where {
    /// Empty clause (matches everything)
    pub fn new() -> Self {
        Where::default()
    }

    /// Appends a predicate for `field`
    pub fn field(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        self.entries.push((field.into(), predicate));
        self
    }

    /// Shorthand for a literal equality entry
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field(field, Predicate::literal(value))
    }

    /// True when no predicates are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[(String, Predicate)] {
        &self.entries
    }

    /// The first entry, which alone decides index assistance
    pub fn first(&self) -> Option<&(String, Predicate)> {
        self.entries.first()
    }
}

/// Sort direction for `order_by`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Options for `find_all` / `find_one`
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Predicate mapping; empty matches every record
    pub where_clause: Where,
    /// Single sort field, natural ordering, id-ascending tie-break
    pub order_by: Option<String>,
    /// Direction for `order_by`
    pub order: SortOrder,
    /// Results skipped after sorting
    pub offset: usize,
    /// Maximum results taken after `offset`; `None` is unlimited
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    pub fn where_clause(mut self, where_clause: Where) -> Self {
        self.where_clause = where_clause;
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(field.into());
        self.order = order;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_where_preserves_insertion_order() {
        let clause = Where::new()
            .eq("city", "Tokyo")
            .field("age", Predicate::ops(vec![FilterOp::Gte(json!(18))]));

        let entries = clause.entries();
        assert_eq!(entries[0].0, "city");
        assert_eq!(entries[1].0, "age");
        assert_eq!(
            clause.first().unwrap().1,
            Predicate::Literal(json!("Tokyo"))
        );
    }

    #[test]
    fn test_empty_where() {
        assert!(Where::new().is_empty());
        assert!(Where::new().first().is_none());
    }

    #[test]
    fn test_options_defaults() {
        let options = FindOptions::new();
        assert!(options.where_clause.is_empty());
        assert!(options.order_by.is_none());
        assert_eq!(options.order, SortOrder::Asc);
        assert_eq!(options.offset, 0);
        assert!(options.limit.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = FindOptions::new()
            .where_clause(Where::new().eq("age", 30))
            .order_by("age", SortOrder::Desc)
            .offset(2)
            .limit(5);

        assert_eq!(options.order_by.as_deref(), Some("age"));
        assert_eq!(options.order, SortOrder::Desc);
        assert_eq!(options.offset, 2);
        assert_eq!(options.limit, Some(5));
    }
}
