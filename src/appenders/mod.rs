//! Appender implementations

pub mod console;
pub mod event_log;
pub mod file;
pub mod json;

pub use console::ConsoleAppender;
pub use event_log::{EventLogAppender, EventLogBackend, EventSeverity};
pub use file::FileAppender;
pub use json::JsonAppender;

pub use crate::core::Appender;
