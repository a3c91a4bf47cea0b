//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod flush_policy;
pub mod log_kind;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod running_log;

pub use appender::Appender;
pub use config::{
    autogen_file_name, Degradation, EventLogConfig, EventLoggingSection, LoggerConfig,
    LoggingSection, AUTOGEN_FILE_NAME, DEFAULT_EVENT_SOURCE,
};
pub use error::{LoggerError, Result, SinkFailure};
pub use flush_policy::{
    FlushPolicy, FlushTrigger, DEFAULT_MAX_QUEUE_AGE, DEFAULT_QUEUE_SIZE_THRESHOLD,
};
pub use log_kind::{KindMask, LogKind};
pub use log_record::{banner, LogRecord, BANNER_WIDTH};
pub use logger::{Logger, LoggerBuilder, END_LOGGING_MARKER};
pub use metrics::LoggerMetrics;
pub use running_log::RunningLog;
