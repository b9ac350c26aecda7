//! Bulk operation tests
//!
//! Bulk operations apply single-item operations in input order, catch every
//! per-item failure in the aggregate result, and never roll back earlier
//! successes.

use serde_json::json;
use shelfdb::{BulkError, Database, Fields, Where};
use tempfile::TempDir;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_bulk_create_all_succeed() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    let mut users = db.collection("users").unwrap();

    let result = users.bulk_create(vec![
        fields(json!({"name": "a"})),
        fields(json!({"name": "b"})),
        fields(json!({"name": "c"})),
    ]);

    assert_eq!(result.success, 3);
    assert_eq!(result.failed, 0);
    assert!(result.errors.is_empty());
    assert_eq!(users.count(Where::new()).unwrap(), 3);
}

#[test]
fn test_bulk_update_mixed_outcomes() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    let mut users = db.collection("users").unwrap();

    let a = users.create(fields(json!({"age": 1}))).unwrap();
    let b = users.create(fields(json!({"age": 2}))).unwrap();

    let result = users.bulk_update(vec![
        (a.id(), fields(json!({"age": 10}))),
        (999, fields(json!({"age": 0}))),
        (b.id(), fields(json!({"age": 20}))),
    ]);

    assert_eq!(result.success, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(
        result.errors,
        vec![BulkError {
            index: 1,
            error: "Record not found".to_string()
        }]
    );

    // Both hits applied despite the miss between them.
    assert_eq!(
        users.read(a.id()).unwrap().unwrap().get("age"),
        Some(&json!(10))
    );
    assert_eq!(
        users.read(b.id()).unwrap().unwrap().get("age"),
        Some(&json!(20))
    );
}

#[test]
fn test_bulk_delete_aggregate_shape() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    let mut users = db.collection("users").unwrap();

    let existing = users.create(fields(json!({"name": "x"}))).unwrap();
    let missing = existing.id() + 100;

    let result = users.bulk_delete(vec![existing.id(), missing]);

    assert_eq!(result.success, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(
        result.errors,
        vec![BulkError {
            index: 1,
            error: "Record not found".to_string()
        }]
    );
    assert!(users.read(existing.id()).unwrap().is_none());
}

#[test]
fn test_no_rollback_earlier_successes_persist() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("data");
    let db = Database::open(&base).unwrap();
    let mut users = db.collection("users").unwrap();

    let a = users.create(fields(json!({"n": 1}))).unwrap();
    let b = users.create(fields(json!({"n": 2}))).unwrap();

    let result = users.bulk_delete(vec![a.id(), 999, b.id()]);
    assert_eq!(result.success, 2);
    assert_eq!(result.failed, 1);

    // Reopen: the deletes before and after the failure both stuck.
    let db = Database::open(&base).unwrap();
    let mut users = db.collection("users").unwrap();
    assert_eq!(users.count(Where::new()).unwrap(), 0);
}

#[test]
fn test_bulk_create_with_explicit_ids_keeps_index_consistent() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    let mut users = db.collection("users").unwrap();

    // Two items share an id; the later one wins and the index follows.
    let result = users.bulk_create(vec![
        fields(json!({"id": 1, "tag": "old"})),
        fields(json!({"id": 1, "tag": "new"})),
    ]);

    assert_eq!(result.success, 2);
    assert_eq!(users.count(Where::new()).unwrap(), 1);
    assert_eq!(users.count(Where::new().eq("tag", "old")).unwrap(), 0);
    assert_eq!(users.count(Where::new().eq("tag", "new")).unwrap(), 1);
}
