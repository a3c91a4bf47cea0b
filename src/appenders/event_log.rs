//! OS event log appender
//!
//! Records are routed per severity (Information, Warning, Error) to a named
//! event source. The source is registered lazily on the first routed record.
//! On unix the backend is syslog(3); hosts can supply their own backend.

use crate::core::{Appender, EventLogConfig, LogKind, LogRecord, Result};

/// Severity understood by an event log backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSeverity {
    Information,
    Warning,
    Error,
}

impl EventSeverity {
    pub fn from_kind(kind: LogKind) -> Option<Self> {
        match kind {
            LogKind::Information => Some(EventSeverity::Information),
            LogKind::Warning => Some(EventSeverity::Warning),
            LogKind::Error => Some(EventSeverity::Error),
            _ => None,
        }
    }
}

/// Destination behind [`EventLogAppender`]
pub trait EventLogBackend: Send {
    /// Make `source_name` usable. Called once, before the first event.
    fn register_source(&mut self, source_name: &str) -> Result<()>;

    fn write_event(&mut self, severity: EventSeverity, message: &str) -> Result<()>;
}

pub struct EventLogAppender {
    config: EventLogConfig,
    backend: Box<dyn EventLogBackend>,
    source_ready: bool,
}

impl EventLogAppender {
    pub fn new(config: EventLogConfig, backend: Box<dyn EventLogBackend>) -> Self {
        Self {
            config,
            backend,
            source_ready: false,
        }
    }

    fn ensure_source(&mut self) -> Result<()> {
        if !self.source_ready {
            self.backend.register_source(&self.config.source_name)?;
            self.source_ready = true;
        }
        Ok(())
    }
}

impl Appender for EventLogAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        if !self.config.routes(record.kind()) {
            return Ok(());
        }
        let Some(severity) = EventSeverity::from_kind(record.kind()) else {
            return Ok(());
        };
        self.ensure_source()?;
        self.backend.write_event(severity, record.message())
    }

    fn name(&self) -> &str {
        "event_log"
    }
}

/// The event log available on this platform
pub fn default_backend() -> Box<dyn EventLogBackend> {
    #[cfg(unix)]
    {
        Box::new(syslog::SyslogBackend::new())
    }
    #[cfg(not(unix))]
    {
        Box::new(UnsupportedBackend)
    }
}

/// Backend for platforms without a supported event log
#[cfg(not(unix))]
pub struct UnsupportedBackend;

#[cfg(not(unix))]
impl EventLogBackend for UnsupportedBackend {
    fn register_source(&mut self, source_name: &str) -> Result<()> {
        Err(crate::core::LoggerError::event_log(
            source_name,
            "no event log backend on this platform",
        ))
    }

    fn write_event(&mut self, _severity: EventSeverity, _message: &str) -> Result<()> {
        Err(crate::core::LoggerError::event_log(
            "",
            "no event log backend on this platform",
        ))
    }
}

#[cfg(unix)]
pub mod syslog {
    //! syslog(3) backend.
    //!
    //! `openlog` keeps the ident pointer, so the ident lives in a static for
    //! the rest of the process.

    use super::{EventLogBackend, EventSeverity};
    use crate::core::{LoggerError, Result};
    use std::ffi::CString;
    use std::sync::OnceLock;

    static IDENT: OnceLock<CString> = OnceLock::new();

    pub struct SyslogBackend {
        opened: bool,
    }

    impl SyslogBackend {
        pub fn new() -> Self {
            Self { opened: false }
        }

        fn priority(severity: EventSeverity) -> libc::c_int {
            match severity {
                EventSeverity::Information => libc::LOG_INFO,
                EventSeverity::Warning => libc::LOG_WARNING,
                EventSeverity::Error => libc::LOG_ERR,
            }
        }
    }

    impl Default for SyslogBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EventLogBackend for SyslogBackend {
        fn register_source(&mut self, source_name: &str) -> Result<()> {
            let ident = CString::new(source_name).map_err(|_| {
                LoggerError::event_log(source_name, "source name contains a NUL byte")
            })?;
            // Only the first source name in the process is used as ident.
            let ident = IDENT.get_or_init(|| ident);

            // SAFETY: the ident pointer stays valid for the process lifetime
            // because it is owned by a static.
            unsafe {
                libc::openlog(ident.as_ptr(), libc::LOG_PID, libc::LOG_USER);
            }
            self.opened = true;
            Ok(())
        }

        fn write_event(&mut self, severity: EventSeverity, message: &str) -> Result<()> {
            if !self.opened {
                return Err(LoggerError::event_log("", "event source not registered"));
            }
            let message = CString::new(message.replace('\0', "\\0"))
                .map_err(|_| LoggerError::event_log("", "message contains a NUL byte"))?;

            // SAFETY: `%s` with a valid C string; syslog may be called from
            // any thread once openlog has run.
            unsafe {
                libc::syslog(
                    Self::priority(severity),
                    c"%s".as_ptr(),
                    message.as_ptr(),
                );
            }
            Ok(())
        }
    }
}
