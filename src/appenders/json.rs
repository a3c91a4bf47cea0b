//! JSON appender writing the whole session history

use crate::core::{Appender, LogRecord, LoggerError, Result, RunningLog};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serializes the complete [`RunningLog`] after every flush.
///
/// In rewrite mode the file always holds exactly one JSON document. In
/// append mode every flush appends another complete document, so the file
/// becomes a sequence of concatenated documents, newest last.
pub struct JsonAppender {
    path: PathBuf,
    append_documents: bool,
    pretty: bool,
}

impl JsonAppender {
    /// Create a new JSON appender
    pub fn new(path: impl Into<PathBuf>, append_documents: bool) -> Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true);
        if append_documents {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            append_documents,
            pretty: true,
        })
    }

    /// Write compact single-line documents instead of pretty-printed ones
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, history: &RunningLog) -> Result<String> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(history)?
        } else {
            serde_json::to_string(history)?
        };
        json.push('\n');
        Ok(json)
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, _record: &LogRecord) -> Result<()> {
        // The history is written as a whole once the batch is drained.
        Ok(())
    }

    fn flush(&mut self, history: &RunningLog) -> Result<()> {
        let json = self.render(history)?;
        let io_context = |e: std::io::Error| {
            LoggerError::io_operation(
                format!("writing {}", self.path.display()),
                "cannot write JSON log",
                e,
            )
        };

        if self.append_documents {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(io_context)?;
            file.write_all(json.as_bytes()).map_err(io_context)?;
        } else {
            fs::write(&self.path, json).map_err(io_context)?;
        }
        Ok(())
    }
}
