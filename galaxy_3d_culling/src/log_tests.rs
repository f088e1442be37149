//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::SceneCuller".to_string(),
        message: "42 nodes visible".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    let severities = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ];
    for severity in severities {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Warn.label().trim(), "WARN");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_location() {
    assert!(!entry(LogSeverity::Info, None, None).has_location());
    assert!(!entry(LogSeverity::Error, Some("a.rs"), None).has_location());
    assert!(entry(LogSeverity::Error, Some("a.rs"), Some(7)).has_location());
}

#[test]
fn test_log_entry_clone() {
    let original = entry(LogSeverity::Warn, Some("light_culler.rs"), Some(10));
    let cloned = original.clone();
    assert_eq!(original.severity, cloned.severity);
    assert_eq!(original.source, cloned.source);
    assert_eq!(original.message, cloned.message);
    assert_eq!(original.file, cloned.file);
    assert_eq!(original.line, cloned.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_plain_format_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[galaxy3d::SceneCuller]"));
    assert!(line.ends_with("42 nodes visible"));
}

#[test]
fn test_default_logger_plain_format_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("pipeline.rs"), Some(99)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(pipeline.rs:99)"));
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger;
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Error, Some("x.rs"), Some(1)));
}
