//! Structured JSON logger
//!
//! - One log line = one event
//! - Deterministic key ordering: `event` first, `level` second, the
//!   remaining fields sorted by key
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Debug-level detail
    Debug = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Level {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger emitting one JSON object per line
pub struct Logger;

impl Logger {
    /// Log an event with the given level and fields to stdout
    pub fn log(level: Level, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(level, event, fields, &mut io::stdout());
    }

    /// Log to stderr (errors and fatal events)
    pub fn log_stderr(level: Level, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(level, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(level: Level, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let mut line = String::with_capacity(128);

        line.push('{');
        line.push_str("\"event\":");
        line.push_str(&json_string(event));
        line.push_str(",\"level\":\"");
        line.push_str(level.as_str());
        line.push('"');

        // Sorted fields keep identical events byte-identical.
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            line.push(',');
            line.push_str(&json_string(key));
            line.push(':');
            line.push_str(&json_string(value));
        }

        line.push('}');
        line.push('\n');

        // One write, one flush per event.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Log at DEBUG level
    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Debug, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log_stderr(Level::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log_stderr(Level::Fatal, event, fields);
    }
}

/// Render a string as a quoted, escaped JSON string.
fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Capture a log line to a string for testing
#[cfg(test)]
pub fn capture_log(level: Level, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(level, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_log_is_valid_json() {
        let line = capture_log(Level::Info, "TEST_EVENT", &[("key", "value")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["key"], "value");
    }

    #[test]
    fn test_log_field_order_is_deterministic() {
        let a = capture_log(Level::Info, "TEST", &[("zebra", "1"), ("apple", "2")]);
        let b = capture_log(Level::Info, "TEST", &[("apple", "2"), ("zebra", "1")]);

        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
    }

    #[test]
    fn test_log_event_leads_line() {
        let line = capture_log(Level::Warn, "MY_EVENT", &[("aardvark", "first")]);

        assert!(line.starts_with("{\"event\":\"MY_EVENT\",\"level\":\"WARN\""));
    }

    #[test]
    fn test_log_escapes_special_characters() {
        let line = capture_log(Level::Info, "TEST", &[("message", "a \"quoted\"\nline")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "a \"quoted\"\nline");
    }

    #[test]
    fn test_log_is_one_line() {
        let line = capture_log(Level::Info, "TEST", &[("a", "1"), ("b", "2")]);

        assert_eq!(line.chars().filter(|c| *c == '\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
