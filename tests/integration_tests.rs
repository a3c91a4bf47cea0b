//! Integration tests for the buffered logger
//!
//! These tests verify:
//! - Threshold flushing into a plain-text file
//! - Gating of Verbose and Debug records
//! - JSON file output in rewrite and append modes
//! - Dispose semantics and the end marker
//! - Degraded start-up and TOML configuration
//! - Sink failure isolation

use runlog::appenders::{EventLogBackend, EventSeverity};
use runlog::core::logger::END_LOGGING_MARKER;
use runlog::prelude::*;
use runlog::{Degradation, LoggingSection};
use serde_json::Value;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn file_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_threshold_flush_skips_gated_verbose() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "session.txt")
        .append_to_day_file(false)
        .queue_size_threshold(3)
        .build();

    logger.info("A");
    logger.info("B");
    logger.verbose("C");
    logger.info("D");

    let lines = file_lines(&temp_dir.path().join("session.txt"));
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("INFORMATION:\t") && lines[0].ends_with("\tA"));
    assert!(lines[1].ends_with("\tB"));
    assert!(lines[2].ends_with("\tD"));
    assert!(!lines.iter().any(|l| l.ends_with("\tC")));
}

#[test]
fn test_records_wait_below_threshold() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("waiting.txt");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "waiting.txt")
        .queue_size_threshold(10)
        .build();

    for i in 0..9 {
        logger.info(format!("Message {}", i));
    }
    assert_eq!(fs::read_to_string(&log_file).unwrap(), "");
    assert_eq!(logger.pending_count(), 9);

    assert_eq!(logger.flush_log().unwrap(), 9);
    assert_eq!(file_lines(&log_file).len(), 9);
}

#[test]
fn test_multiline_message_stays_one_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection.txt");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "injection.txt")
        .build();

    logger.info("User login\nERROR:\t00:00:00\tFake error injected");
    logger.flush_log().unwrap();

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("\\n"));
}

#[test]
fn test_separator_and_empty_lines_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("layout.txt");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "layout.txt")
        .build();

    logger.separator("Step 1");
    logger.empty_line();
    logger.success("done");
    logger.flush_log().unwrap();

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("====") && lines[0].contains(" Step 1 "));
    assert_eq!(lines[1], "");
    assert!(lines[2].starts_with("SUCCESS:\t"));
}

#[test]
fn test_append_mode_keeps_previous_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("day.txt");
    fs::write(&log_file, "earlier session\n").unwrap();

    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "day.txt")
        .append_to_day_file(true)
        .build();
    logger.info("today");
    logger.dispose().unwrap();

    let lines = file_lines(&log_file);
    assert_eq!(lines[0], "earlier session");
    assert!(lines[1].ends_with("\ttoday"));
    assert!(lines[2].ends_with(END_LOGGING_MARKER));
}

#[test]
fn test_dispose_writes_one_end_marker() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("end.txt");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "end.txt")
        .build();

    logger.warning("last words");
    logger.dispose().unwrap();
    logger.dispose().unwrap();
    drop(logger);

    let lines = file_lines(&log_file);
    let markers = lines.iter().filter(|l| l.ends_with(END_LOGGING_MARKER)).count();
    assert_eq!(markers, 1);
    assert!(lines.last().unwrap().starts_with("INFORMATION:\t"));
}

#[test]
fn test_drop_flushes_pending_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("drop.txt");
    {
        let logger = Logger::builder()
            .copy_to_console(false)
            .log_to_file(temp_dir.path(), "drop.txt")
            .build();
        logger.info("pending at drop");
    }

    let lines = file_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("pending at drop"));
}

#[test]
fn test_writes_after_dispose_are_accepted() {
    let logger = Logger::builder()
        .copy_to_console(false)
        .queue_size_threshold(1)
        .build();
    logger.dispose().unwrap();

    logger.info("late");
    assert_eq!(logger.snapshot().len(), 1);
}

#[test]
fn test_json_rewrite_mode_holds_full_history() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("session.json");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "session.json")
        .use_json(true)
        .append_to_day_file(false)
        .queue_size_threshold(2)
        .build();

    logger.info("one");
    logger.error("two");
    logger.info("three");
    logger.flush_log().unwrap();

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    let entries = parsed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["kind"], "Error");
    assert_eq!(entries[2]["message"], "three");
}

#[test]
fn test_json_append_mode_concatenates_documents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("day.json");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "day.json")
        .use_json(true)
        .append_to_day_file(true)
        .build();

    logger.info("first");
    logger.flush_log().unwrap();
    logger.info("second");
    logger.flush_log().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let documents: Vec<RunningLog> = serde_json::Deserializer::from_str(&content)
        .into_iter::<RunningLog>()
        .collect::<std::result::Result<_, _>>()
        .unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].len(), 2);
}

#[test]
fn test_empty_flush_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("empty.json");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "empty.json")
        .use_json(true)
        .build();

    assert_eq!(logger.flush_log().unwrap(), 0);
    assert_eq!(fs::read_to_string(&log_file).unwrap(), "");
    assert_eq!(logger.metrics().total_flushes(), 0);
}

#[test]
fn test_missing_directory_degrades_to_console() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("not-created");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(&missing, "x.txt")
        .build();

    assert_eq!(
        logger.degradation(),
        Some(&Degradation::MissingLogDirectory(missing.clone()))
    );
    assert!(!missing.exists());

    logger.info("Info() visible");
    let report = logger.running_log(false, true);
    assert!(report.contains("Info() visible"));
    assert!(report.contains("does not exist"));
}

#[test]
fn test_report_visible_without_explicit_flush() {
    let logger = Logger::builder().copy_to_console(false).verbose(true).build();
    logger.info("Info() visible");
    logger.verbose("detail");

    assert!(logger.running_log(false, true).contains("Info() visible"));
    assert!(!logger.running_log(false, false).contains("detail"));
    assert!(logger.running_log(false, true).contains("detail"));

    let html = logger.running_log(true, true);
    assert!(html.starts_with("<html>"));
    assert!(html.contains("<tr class=\"verbose\">"));
    assert!(logger.to_html_table(false).starts_with("<style"));
}

#[test]
fn test_config_file_with_logging_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("app.toml");
    let log_dir = temp_dir.path().join("logs");
    fs::create_dir(&log_dir).unwrap();
    fs::write(
        &config_path,
        format!(
            r#"
[service]
name = "nightly"

[logging]
isEnabled = true
copyToConsole = false
verbose = true
queueSize = 2
maxQueueAge = 120
logDirectory = "{}"
logFileName = "nightly.txt"
"#,
            log_dir.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let logger = Logger::from_config_file(&config_path);
    assert!(logger.degradation().is_none());
    assert!(logger.config().verbose);
    assert_eq!(logger.config().flush_policy.max_queue_age, Duration::from_secs(120));

    logger.verbose("kept");
    logger.info("flushed by size");
    assert_eq!(file_lines(&log_dir.join("nightly.txt")).len(), 2);
}

#[test]
fn test_missing_config_file_runs_console_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::from_config_file(temp_dir.path().join("absent.toml"));

    assert!(matches!(
        logger.degradation(),
        Some(Degradation::ConfigUnavailable(_))
    ));
    assert!(!logger.config().log_to_file);
    assert!(logger.config().copy_to_console);
}

#[test]
fn test_autogen_file_name_from_section() {
    let section = LoggingSection::from_toml_str("isEnabled = true\nuseJSON = true\n").unwrap();
    let config = LoggerConfig::from_section(&section);
    assert!(config.use_json);
    assert!(config.log_file_name.ends_with(".json"));
    assert_eq!(config.log_file_name.as_bytes()[4], b'-');
}

#[derive(Clone, Default)]
struct SharedEvents(Arc<Mutex<Vec<(EventSeverity, String)>>>);

impl EventLogBackend for SharedEvents {
    fn register_source(&mut self, _source_name: &str) -> runlog::Result<()> {
        Ok(())
    }

    fn write_event(&mut self, severity: EventSeverity, message: &str) -> runlog::Result<()> {
        self.0.lock().unwrap().push((severity, message.to_string()));
        Ok(())
    }
}

#[test]
fn test_event_log_routing_per_write() {
    let events = SharedEvents::default();
    let logger = Logger::builder()
        .copy_to_console(false)
        .event_log(EventLogConfig {
            enabled: true,
            info: false,
            warning: true,
            error: true,
            source_name: "nightly".to_string(),
        })
        .event_log_backend(events.clone())
        .queue_size_threshold(100)
        .build();

    logger.info("not routed");
    logger.warning("routed warning");
    logger.error("routed error");

    // Event log is written per write, not per flush.
    assert_eq!(logger.pending_count(), 3);
    let recorded = events.0.lock().unwrap();
    assert_eq!(
        *recorded,
        vec![
            (EventSeverity::Warning, "routed warning".to_string()),
            (EventSeverity::Error, "routed error".to_string()),
        ]
    );
}

struct BrokenAppender;

impl Appender for BrokenAppender {
    fn append(&mut self, _record: &LogRecord) -> runlog::Result<()> {
        Err(LoggerError::other("device unplugged"))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_failing_sink_does_not_block_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("isolated.txt");
    let logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(temp_dir.path(), "isolated.txt")
        .appender(BrokenAppender)
        .queue_size_threshold(2)
        .build();

    logger.info("a");
    logger.info("b");
    assert_eq!(file_lines(&log_file).len(), 2);

    let err = logger.flush_log().unwrap_err();
    assert!(err.to_string().contains("broken"));
    assert!(logger.metrics().sink_failures() >= 2);

    // Failures were reported once; the diagnostic has been drained.
    let lines = file_lines(&log_file);
    assert!(lines[2].starts_with("ERROR:\t"));
    assert!(lines[2].contains("device unplugged"));
}
