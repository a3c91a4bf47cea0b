//! Engine configuration
//!
//! A [`LoggerConfig`] is fixed when the engine is built. It can be assembled
//! directly (or through [`LoggerBuilder`](super::LoggerBuilder)) or resolved
//! from a [`LoggingSection`] read out of a TOML document.

use super::error::{LoggerError, Result};
use super::flush_policy::{FlushPolicy, DEFAULT_MAX_QUEUE_AGE, DEFAULT_QUEUE_SIZE_THRESHOLD};
use super::log_kind::LogKind;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name sentinel that asks for a generated `{date}_{executable}` name
pub const AUTOGEN_FILE_NAME: &str = "autogen";

/// Event source used when none is configured
pub const DEFAULT_EVENT_SOURCE: &str = "runlog";

/// Routing of records to the OS event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogConfig {
    pub enabled: bool,
    pub info: bool,
    pub warning: bool,
    pub error: bool,
    pub source_name: String,
}

impl EventLogConfig {
    /// Whether a record of `kind` goes to the event log
    pub fn routes(&self, kind: LogKind) -> bool {
        self.enabled
            && match kind {
                LogKind::Information => self.info,
                LogKind::Warning => self.warning,
                LogKind::Error => self.error,
                _ => false,
            }
    }
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            info: false,
            warning: true,
            error: true,
            source_name: DEFAULT_EVENT_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub log_to_file: bool,
    pub copy_to_console: bool,
    pub debug: bool,
    pub verbose: bool,
    /// Keep existing file content (plain text) or append one JSON document
    /// per flush (JSON mode) instead of starting a fresh file
    pub append_to_day_file: bool,
    pub use_json: bool,
    pub log_dir: PathBuf,
    pub log_file_name: String,
    pub flush_policy: FlushPolicy,
    pub event_log: EventLogConfig,
}

impl LoggerConfig {
    /// Explicit-parameter configuration with the default flush policy
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        log_to_file: bool,
        log_to_screen: bool,
        is_debug: bool,
        is_verbose: bool,
        append_to_day_log: bool,
        use_json: bool,
        log_dir: impl Into<PathBuf>,
        log_file_name: impl Into<String>,
    ) -> Self {
        Self {
            log_to_file,
            copy_to_console: log_to_screen,
            debug: is_debug,
            verbose: is_verbose,
            append_to_day_file: append_to_day_log,
            use_json,
            log_dir: log_dir.into(),
            log_file_name: log_file_name.into(),
            flush_policy: FlushPolicy::default(),
            event_log: EventLogConfig::default(),
        }
    }

    /// Echo to the console and keep the in-memory history, nothing else
    pub fn console_only() -> Self {
        Self {
            log_to_file: false,
            copy_to_console: true,
            debug: false,
            verbose: false,
            append_to_day_file: true,
            use_json: false,
            log_dir: PathBuf::new(),
            log_file_name: String::new(),
            flush_policy: FlushPolicy::default(),
            event_log: EventLogConfig::default(),
        }
    }

    /// Full path of the file sink
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Resolve a configuration section, expanding the `autogen` file name
    pub fn from_section(section: &LoggingSection) -> Self {
        let log_file_name = if section.log_file_name.eq_ignore_ascii_case(AUTOGEN_FILE_NAME)
            || section.log_file_name.is_empty()
        {
            autogen_file_name(Local::now().date_naive(), &executable_name(), section.use_json)
        } else {
            section.log_file_name.clone()
        };

        let events = &section.event_logging;
        Self {
            log_to_file: section.is_enabled,
            copy_to_console: section.copy_to_console,
            debug: section.debug,
            verbose: section.verbose,
            append_to_day_file: section.append_to_day_log_file,
            use_json: section.use_json,
            log_dir: PathBuf::from(&section.log_directory),
            log_file_name,
            flush_policy: FlushPolicy::new(
                section.queue_size,
                Duration::from_secs(section.max_queue_age),
            ),
            event_log: EventLogConfig {
                enabled: events.enabled,
                info: events.info,
                warning: events.warning,
                error: events.error,
                source_name: if events.source_name.is_empty() {
                    DEFAULT_EVENT_SOURCE.to_string()
                } else {
                    events.source_name.clone()
                },
            },
        }
    }

    /// Read and resolve a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        LoggingSection::load(path).map(|section| Self::from_section(&section))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::console_only()
    }
}

/// Generated log file name: `{YYYY-MM-DD}_{executable}.txt` (`.json` in JSON mode)
pub fn autogen_file_name(date: NaiveDate, executable: &str, use_json: bool) -> String {
    let extension = if use_json { "json" } else { "txt" };
    format!("{}_{}.{}", date.format("%Y-%m-%d"), executable, extension)
}

fn executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "runlog".to_string())
}

/// Event log part of a [`LoggingSection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLoggingSection {
    pub enabled: bool,
    pub info: bool,
    pub warning: bool,
    pub error: bool,
    pub source_name: String,
}

impl Default for EventLoggingSection {
    fn default() -> Self {
        let defaults = EventLogConfig::default();
        Self {
            enabled: defaults.enabled,
            info: defaults.info,
            warning: defaults.warning,
            error: defaults.error,
            source_name: defaults.source_name,
        }
    }
}

/// Logging section of a host configuration document.
///
/// Accepted either at the document root or under a `[logging]` table:
///
/// ```toml
/// [logging]
/// isEnabled = true
/// copyToConsole = true
/// queueSize = 25
/// maxQueueAge = 10
/// logDirectory = "/var/log/app"
/// logFileName = "autogen"
///
/// [logging.eventLogging]
/// enabled = true
/// sourceName = "app"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSection {
    pub is_enabled: bool,
    pub copy_to_console: bool,
    pub debug: bool,
    pub verbose: bool,
    #[serde(rename = "useJSON")]
    pub use_json: bool,
    pub append_to_day_log_file: bool,
    pub queue_size: usize,
    /// Seconds
    pub max_queue_age: u64,
    pub log_directory: String,
    pub log_file_name: String,
    pub event_logging: EventLoggingSection,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            is_enabled: false,
            copy_to_console: true,
            debug: false,
            verbose: false,
            use_json: false,
            append_to_day_log_file: true,
            queue_size: DEFAULT_QUEUE_SIZE_THRESHOLD,
            max_queue_age: DEFAULT_MAX_QUEUE_AGE.as_secs(),
            log_directory: String::new(),
            log_file_name: AUTOGEN_FILE_NAME.to_string(),
            event_logging: EventLoggingSection::default(),
        }
    }
}

impl LoggingSection {
    /// Parse a TOML document holding the section at its root or under `[logging]`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: toml::Table = toml::from_str(content)?;
        let section: LoggingSection = match document.get("logging") {
            Some(toml::Value::Table(table)) => toml::Value::Table(table.clone()).try_into()?,
            Some(_) => {
                return Err(LoggerError::config(
                    "logging",
                    "`logging` must be a table",
                ))
            }
            None => toml::Value::Table(document).try_into()?,
        };
        Ok(section)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                format!("reading {}", path.display()),
                "configuration file is not readable",
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }
}

/// Why the engine is running with fewer sinks than configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// File logging requested but the directory does not exist
    MissingLogDirectory(PathBuf),
    /// The log file exists in a valid directory but cannot be opened
    LogFileUnavailable { path: PathBuf, reason: String },
    /// The configuration source could not be read or parsed
    ConfigUnavailable(String),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::MissingLogDirectory(dir) => write!(
                f,
                "Log directory '{}' does not exist; file logging disabled, console only",
                dir.display()
            ),
            Degradation::LogFileUnavailable { path, reason } => write!(
                f,
                "Log file '{}' cannot be opened ({}); file logging disabled, console only",
                path.display(),
                reason
            ),
            Degradation::ConfigUnavailable(reason) => write!(
                f,
                "Logging configuration unavailable ({}); console only",
                reason
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_parameters() {
        let config = LoggerConfig::new(true, false, true, false, true, false, "/tmp/logs", "app.txt");
        assert!(config.log_to_file);
        assert!(!config.copy_to_console);
        assert!(config.debug);
        assert!(!config.verbose);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/logs/app.txt"));
        assert_eq!(config.flush_policy, FlushPolicy::default());
    }

    #[test]
    fn test_autogen_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(autogen_file_name(date, "sync", false), "2024-07-09_sync.txt");
        assert_eq!(autogen_file_name(date, "sync", true), "2024-07-09_sync.json");
    }

    #[test]
    fn test_section_at_root() {
        let section = LoggingSection::from_toml_str(
            r#"
            isEnabled = true
            copyToConsole = false
            useJSON = true
            queueSize = 3
            maxQueueAge = 7
            logDirectory = "/var/log/app"
            logFileName = "run.json"
            "#,
        )
        .unwrap();

        assert!(section.is_enabled);
        assert!(section.use_json);
        let config = LoggerConfig::from_section(&section);
        assert_eq!(config.flush_policy.queue_size_threshold, 3);
        assert_eq!(config.flush_policy.max_queue_age, Duration::from_secs(7));
        assert_eq!(config.log_path(), PathBuf::from("/var/log/app/run.json"));
        assert!(!config.copy_to_console);
    }

    #[test]
    fn test_section_under_logging_table() {
        let section = LoggingSection::from_toml_str(
            r#"
            [server]
            port = 8080

            [logging]
            verbose = true
            logFileName = "AUTOGEN"

            [logging.eventLogging]
            enabled = true
            info = true
            sourceName = "nightly-sync"
            "#,
        )
        .unwrap();

        let config = LoggerConfig::from_section(&section);
        assert!(config.verbose);
        assert!(config.log_file_name.ends_with(".txt"));
        assert!(config.log_file_name.contains('_'));
        assert!(config.event_log.routes(LogKind::Information));
        assert!(config.event_log.routes(LogKind::Error));
        assert!(!config.event_log.routes(LogKind::Verbose));
        assert_eq!(config.event_log.source_name, "nightly-sync");
    }

    #[test]
    fn test_invalid_documents() {
        assert!(LoggingSection::from_toml_str("logging = 5").is_err());
        assert!(LoggingSection::from_toml_str("queueSize = \"many\"").is_err());
        assert!(LoggingSection::from_toml_str("not toml at all [").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = LoggerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_event_routing_requires_enabled() {
        let mut events = EventLogConfig {
            enabled: false,
            info: true,
            warning: true,
            error: true,
            source_name: "x".to_string(),
        };
        assert!(!events.routes(LogKind::Error));
        events.enabled = true;
        assert!(events.routes(LogKind::Warning));
        assert!(!events.routes(LogKind::Success));
    }

    #[test]
    fn test_degradation_display() {
        let d = Degradation::MissingLogDirectory(PathBuf::from("/nope"));
        assert!(d.to_string().contains("/nope"));
        assert!(d.to_string().contains("console only"));
    }
}
