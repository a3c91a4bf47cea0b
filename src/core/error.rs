//! Error types for the logging engine

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// A sink that failed while flushes were draining the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Name reported by the appender (`"file"`, `"json"`, ...)
    pub sink: String,
    /// First error of the streak
    pub message: String,
    /// Number of flushes in which the sink failed
    pub occurrences: usize,
}

impl SinkFailure {
    pub fn new(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sink: sink.into(),
            message: message.into(),
            occurrences: 1,
        }
    }

    /// Fold `failure` into the entry for the same sink, or add it
    pub fn merge_into(failures: &mut Vec<SinkFailure>, failure: SinkFailure) {
        match failures.iter_mut().find(|f| f.sink == failure.sink) {
            Some(existing) => existing.occurrences += failure.occurrences,
            None => failures.push(failure),
        }
    }
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sink, self.message)?;
        if self.occurrences > 1 {
            write!(f, " ({} flushes)", self.occurrences)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Event log source could not be created or written
    #[error("Event log error for source '{source_name}': {message}")]
    EventLogError {
        source_name: String,
        message: String,
    },

    /// One or more sinks failed during a flush
    #[error("{} sink(s) failed during flush: {}", .failures.len(), join_failures(.failures))]
    SinkFailures { failures: Vec<SinkFailure> },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn join_failures(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create an event log error
    pub fn event_log(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::EventLogError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
