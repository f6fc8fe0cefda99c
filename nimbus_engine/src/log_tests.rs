//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, entry formatting and the DefaultLogger filter.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "nimbus::Workspace".to_string(),
        message: "re-allocated 4096 bytes".to_string(),
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
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Info.label().trim(), "INFO");
}

// ============================================================================
// FORMATTING TESTS
// ============================================================================

#[test]
fn test_format_entry_without_location() {
    let line = format_entry(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[nimbus::Workspace]"));
    assert!(line.ends_with("re-allocated 4096 bytes"));
}

#[test]
fn test_format_entry_with_location() {
    let line = format_entry(&entry(LogSeverity::Error, Some("stream_buffer.rs"), Some(88)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(stream_buffer.rs:88)"));
}

#[test]
fn test_format_entry_timestamp_shape() {
    let line = format_entry(&entry(LogSeverity::Debug, None, None));
    // [YYYY-MM-DD HH:MM:SS.mmm]
    let close = line.find(']').unwrap();
    assert_eq!(close, 24);
    assert_eq!(&line[11..12], " ");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity_default() {
    let logger = DefaultLogger::default();
    if cfg!(debug_assertions) {
        assert_eq!(logger.min_severity, LogSeverity::Debug);
    } else {
        assert_eq!(logger.min_severity, LogSeverity::Info);
    }
}

#[test]
fn test_default_logger_accepts_all_severities() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Error, Some("file.rs"), Some(1)));
}

#[test]
fn test_logger_trait_object() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger::new(LogSeverity::Error));
    // Filtered out, must not panic
    logger.log(&entry(LogSeverity::Trace, None, None));
}
