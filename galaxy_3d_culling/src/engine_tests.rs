//! Unit tests for the Engine logging hub
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::galaxy3d::Engine;
use crate::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
///
/// Only entries from "galaxy3d::test" sources are kept: other tests may log
/// from pipeline code while one of these runs.
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source.starts_with("galaxy3d::test") {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

// ============================================================================
// LOGGER MANAGEMENT
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_messages() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Debug, "galaxy3d::test", "hello".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Debug);
        assert_eq!(captured[0].source, "galaxy3d::test");
        assert_eq!(captured[0].message, "hello");
        assert!(captured[0].file.is_none());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "galaxy3d::test", "boom".to_string(), "x.rs", 12);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured[0].file, Some("x.rs"));
        assert_eq!(captured[0].line, Some(12));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!("galaxy3d::test", "t {}", 1);
    crate::engine_debug!("galaxy3d::test", "d {}", 2);
    crate::engine_info!("galaxy3d::test", "i {}", 3);
    crate::engine_warn!("galaxy3d::test", "w {}", 4);
    crate::engine_error!("galaxy3d::test", "e {}", 5);

    {
        let captured = entries.lock().unwrap();
        let severities: Vec<LogSeverity> = captured.iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]);
        assert_eq!(captured[4].message, "e 5");
        assert!(captured[4].has_location());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "galaxy3d::test", "to console".to_string());
    assert!(entries.lock().unwrap().is_empty());
}
