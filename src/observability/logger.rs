//! Structured JSON logger
//!
//! One log line = one event, written synchronously with no buffering and no
//! background threads. Output is deterministic: fields serialize in sorted
//! key order, so identical events always produce identical lines.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Minimum severity that gets emitted; events below it are dropped
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// Synchronous structured logger
pub struct Logger;

impl Logger {
    /// Sets the process-wide minimum severity.
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Debug, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Errors go to stderr.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        if Self::enabled(Severity::Error) {
            Self::emit(Severity::Error, event, fields, &mut io::stderr());
        }
    }

    fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if Self::enabled(severity) {
            Self::emit(severity, event, fields, &mut io::stdout());
        }
    }

    fn enabled(severity: Severity) -> bool {
        severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    fn emit<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let line = Self::render(severity, event, fields);
        // One write, one flush; logging failures never affect execution.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Renders one event as a JSON line with sorted keys.
    ///
    /// Caller fields go in first; `event` and `severity` are written last
    /// so a field sharing their name can never overwrite them.
    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut map = BTreeMap::new();
        for (key, value) in fields {
            map.insert(*key, *value);
        }
        map.insert("event", event);
        map.insert("severity", severity.as_str());

        let mut line =
            serde_json::to_string(&map).unwrap_or_else(|_| String::from("{}"));
        line.push('\n');
        line
    }
}
