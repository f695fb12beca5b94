//! Structured JSON logger.
//!
//! One log line is one event: a single JSON object with the event name
//! first, then the severity, then the remaining fields in alphabetical
//! order. Logging is synchronous and unbuffered; INFO goes to stdout,
//! WARN and ERROR to stderr.

use std::io::{self, Write};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations.
    Info,
    /// Recoverable issues (dropped rows, failed backups).
    Warn,
    /// Operation failures.
    Error,
}

impl Severity {
    /// String form used in the log line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Line-oriented JSON event logger.
pub struct Logger;

impl Logger {
    /// Log at INFO level.
    pub fn info(event: &str, fields: &[(&str, String)]) {
        Self::write_event(&mut io::stdout(), Severity::Info, event, fields);
    }

    /// Log at WARN level.
    pub fn warn(event: &str, fields: &[(&str, String)]) {
        Self::write_event(&mut io::stderr(), Severity::Warn, event, fields);
    }

    /// Log at ERROR level.
    pub fn error(event: &str, fields: &[(&str, String)]) {
        Self::write_event(&mut io::stderr(), Severity::Error, event, fields);
    }

    fn write_event<W: Write>(
        writer: &mut W,
        severity: Severity,
        event: &str,
        fields: &[(&str, String)],
    ) {
        // The object is assembled by hand so the key order is fixed:
        // event, severity, then fields sorted alphabetically.
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        push_json_string(&mut line, event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, severity.as_str());

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }

        line.push_str("}\n");

        // A logging failure must never fail the operation being logged.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Append `value` to `out` as a JSON string literal, escaped.
fn push_json_string(out: &mut String, value: &str) {
    // serde_json's Display for Value::String produces the quoted,
    // escaped literal.
    out.push_str(&serde_json::Value::String(value.to_string()).to_string());
}

#[cfg(test)]
fn capture(severity: Severity, event: &str, fields: &[(&str, String)]) -> String {
    let mut buffer = Vec::new();
    Logger::write_event(&mut buffer, severity, event, fields);
    String::from_utf8(buffer).unwrap()
}
