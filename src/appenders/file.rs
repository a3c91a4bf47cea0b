//! Plain-text file appender

use crate::core::{Appender, LogRecord, LoggerError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends one line per record to a text file.
///
/// The file is opened, locked, written and closed for every record so that
/// several processes can share a day file without interleaving lines.
pub struct FileAppender {
    path: PathBuf,
}

impl FileAppender {
    /// Create the appender, creating the file if needed.
    ///
    /// With `append` set existing content is kept; otherwise the file is
    /// truncated so the session starts from an empty log.
    pub fn new(path: impl Into<PathBuf>, append: bool) -> Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_locked(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening {}", self.path.display()),
                    "cannot append to log file",
                    e,
                )
            })?;
        FileExt::lock_exclusive(&file)
            .map_err(|_| LoggerError::file_lock(self.path.display().to_string()))?;
        Ok(file)
    }
}

impl Appender for FileAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut file = self.open_locked()?;

        let mut output = record.to_line();
        output.push('\n');

        let written = file.write_all(output.as_bytes());
        // Closing the handle releases the lock as well; unlock explicitly so
        // the error from the write is the one reported.
        let _ = FileExt::unlock(&file);
        written.map_err(|e| {
            LoggerError::io_operation(
                format!("writing {}", self.path.display()),
                "cannot append to log file",
                e,
            )
        })
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_appender_writes_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("run.txt");

        let mut appender = FileAppender::new(&log_path, true)?;
        appender.append(&LogRecord::new(LogKind::Information, "first"))?;
        appender.append(&LogRecord::new(LogKind::Separator, "PHASE"))?;
        appender.append(&LogRecord::new(LogKind::Empty, ""))?;
        appender.append(&LogRecord::new(LogKind::Error, "second"))?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("INFORMATION:\t"));
        assert!(lines[0].ends_with("\tfirst"));
        assert!(lines[1].contains(" PHASE "));
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("ERROR:\t"));
        Ok(())
    }

    #[test]
    fn test_append_mode_keeps_previous_content() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("day.txt");
        fs::write(&log_path, "earlier session\n")?;

        let mut appender = FileAppender::new(&log_path, true)?;
        appender.append(&LogRecord::new(LogKind::Information, "today"))?;

        let content = fs::read_to_string(&log_path)?;
        assert!(content.starts_with("earlier session\n"));
        assert!(content.contains("today"));
        Ok(())
    }

    #[test]
    fn test_truncate_mode_starts_fresh() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("fresh.txt");
        fs::write(&log_path, "stale\n")?;

        let mut appender = FileAppender::new(&log_path, false)?;
        appender.append(&LogRecord::new(LogKind::Warning, "new"))?;

        let content = fs::read_to_string(&log_path)?;
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = FileAppender::new("/no/such/dir/run.txt", true);
        assert!(matches!(result, Err(LoggerError::FileAppenderError { .. })));
    }
}
