//! Observability subsystem for shelfdb
//!
//! Structured JSON logging with deterministic output.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on execution
//! 2. Synchronous, no buffering, no background threads
//! 3. Deterministic output (sorted keys, one line per event)

mod logger;

pub use logger::{Logger, Severity};
