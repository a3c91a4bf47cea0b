//! # runlog
//!
//! A buffered session logger. Records are queued in memory and written out in
//! batches, while the whole session history stays available for reports.
//!
//! ## Features
//!
//! - **Buffered Writes**: Flushes on a size threshold, a maximum queue age,
//!   an explicit call, or disposal
//! - **Several Sinks**: Plain-text or JSON files, colored console echo, the
//!   OS event log, and custom appenders
//! - **Session History**: Plain-text and HTML reports of everything logged
//! - **Never Throws on Write**: Sink failures are isolated and reported on
//!   the next explicit flush
//!
//! ```
//! use runlog::prelude::*;
//! use runlog::info;
//!
//! let logger = Logger::builder().copy_to_console(false).build();
//! info!(logger, "Processed {} files", 3);
//! assert!(logger.running_log(false, true).contains("Processed 3 files"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, EventLogAppender, FileAppender, JsonAppender};
    pub use crate::core::{
        Appender, Degradation, EventLogConfig, FlushPolicy, FlushTrigger, LogKind, LogRecord,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, RunningLog,
    };
}

pub use appenders::{
    ConsoleAppender, EventLogAppender, EventLogBackend, EventSeverity, FileAppender, JsonAppender,
};
pub use core::{
    Appender, Degradation, EventLogConfig, FlushPolicy, FlushTrigger, KindMask, LogKind,
    LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggingSection,
    Result, RunningLog, SinkFailure,
};
