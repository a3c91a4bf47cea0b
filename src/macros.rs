//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use runlog::prelude::*;
//! use runlog::{info, separator};
//!
//! let logger = Logger::builder().copy_to_console(false).build();
//!
//! separator!(logger, "Import");
//! let files = 12;
//! info!(logger, "Imported {} files", files);
//! ```

/// Log a message of any kind with automatic formatting.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).build();
/// use runlog::log;
/// log!(logger, LogKind::Information, "Simple message");
/// log!(logger, LogKind::Error, "Exit code: {}", 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $kind:expr, $($arg:tt)+) => {
        $logger.log($kind, format!($($arg)+))
    };
}

/// Log an Information record.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).build();
/// use runlog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Information, $($arg)+)
    };
}

/// Log a Warning record.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).build();
/// use runlog::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Warning, $($arg)+)
    };
}

/// Log an Error record.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).build();
/// use runlog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "HTTP error: {}", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Error, $($arg)+)
    };
}

/// Log a Debug record; dropped unless the debug gate is open.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).debug(true).build();
/// use runlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Debug, $($arg)+)
    };
}

/// Log a Verbose record; dropped unless the verbose gate is open.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Success, $($arg)+)
    };
}

/// Log a separator banner, optionally titled.
///
/// # Examples
///
/// ```
/// # use runlog::prelude::*;
/// # let logger = Logger::builder().copy_to_console(false).build();
/// use runlog::separator;
/// separator!(logger);
/// separator!(logger, "Step {}", 2);
/// ```
#[macro_export]
macro_rules! separator {
    ($logger:expr) => {
        $logger.separator(String::new())
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogKind::Separator, $($arg)+)
    };
}
