//! The buffered logging engine

use super::{
    appender::Appender,
    config::{Degradation, EventLogConfig, LoggerConfig},
    error::{LoggerError, Result, SinkFailure},
    flush_policy::{FlushPolicy, FlushTrigger},
    log_kind::LogKind,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    report,
    running_log::RunningLog,
};
use crate::appenders::event_log::default_backend;
use crate::appenders::{
    ConsoleAppender, EventLogAppender, EventLogBackend, FileAppender, JsonAppender,
};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Message of the record written when a file-logging engine is disposed
pub const END_LOGGING_MARKER: &str = "END LOGGING";

static GLOBAL: OnceLock<Logger> = OnceLock::new();

struct DrainSink {
    appender: Box<dyn Appender>,
    /// Set while the sink keeps failing, so only the first failure of a
    /// streak is written into the log itself
    failing: bool,
}

/// Everything guarded by the queue lock
struct EngineState {
    pending: VecDeque<LogRecord>,
    /// Start of the age clock; only age-triggered flushes move it
    last_flush: Instant,
    flushing: bool,
    history: RunningLog,
    sinks: Vec<DrainSink>,
    /// Sink failures not yet returned from an explicit flush or dispose
    unreported: Vec<SinkFailure>,
}

/// Buffered logging engine.
///
/// Writes are filtered by the Verbose/Debug gates, queued, and flushed
/// synchronously on the writing thread once the [`FlushPolicy`] says so.
/// Flushing drains the whole queue, in order, into the [`RunningLog`] and
/// every drain sink (file or JSON file plus any custom appenders). Console
/// echo and event-log routing happen per write, outside the queue lock.
///
/// Appenders must not call back into the logger that owns them.
///
/// # Example
/// ```
/// use runlog::prelude::*;
///
/// let logger = Logger::builder()
///     .copy_to_console(false)
///     .queue_size_threshold(2)
///     .build();
///
/// logger.info("first");
/// logger.warning("second");
/// assert_eq!(logger.pending_count(), 0);
/// assert_eq!(logger.snapshot().len(), 2);
/// ```
pub struct Logger {
    config: LoggerConfig,
    degradation: Option<Degradation>,
    state: Mutex<EngineState>,
    console: Option<Mutex<ConsoleAppender>>,
    event_log: Option<Mutex<EventLogAppender>>,
    metrics: LoggerMetrics,
    disposed: AtomicBool,
}

impl Logger {
    /// Build an owned engine from a configuration
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        LoggerBuilder::from_config(config).build()
    }

    /// Build an owned engine from a TOML configuration file.
    ///
    /// A missing or invalid file leaves the engine in console-only mode.
    #[must_use]
    pub fn from_config_file(path: impl AsRef<Path>) -> Self {
        match LoggerConfig::from_file(path) {
            Ok(config) => Self::new(config),
            Err(e) => LoggerBuilder::from_config(LoggerConfig::console_only())
                .degraded(Degradation::ConfigUnavailable(e.to_string()))
                .build(),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Install the process-wide engine.
    ///
    /// The first call wins: later calls keep the existing engine and ignore
    /// their configuration. The first call also registers an exit hook that
    /// disposes the engine when the process exits normally.
    pub fn init(config: LoggerConfig) -> &'static Logger {
        Self::install(move || Logger::new(config))
    }

    /// Install the process-wide engine from a TOML configuration file
    pub fn init_from_file(path: impl AsRef<Path>) -> &'static Logger {
        let path: PathBuf = path.as_ref().to_path_buf();
        Self::install(move || Logger::from_config_file(path))
    }

    /// The process-wide engine, if one was installed
    pub fn global() -> Option<&'static Logger> {
        GLOBAL.get()
    }

    fn install(make: impl FnOnce() -> Logger) -> &'static Logger {
        let mut created = false;
        let logger = GLOBAL.get_or_init(|| {
            created = true;
            make()
        });
        if created {
            register_exit_hook();
        } else {
            eprintln!("[LOGGER WARNING] Logger already initialized; new configuration ignored");
        }
        logger
    }

    pub fn log(&self, kind: LogKind, message: impl Into<String>) {
        if !self.passes_gate(kind) {
            self.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(kind, message);
        {
            let mut state = self.state.lock();
            self.enqueue_locked(&mut state, record.clone());
        }
        self.echo(&record);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogKind::Information, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogKind::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogKind::Error, message);
    }

    #[inline]
    pub fn success(&self, message: impl Into<String>) {
        self.log(LogKind::Success, message);
    }

    /// Dropped unless the debug gate is open
    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogKind::Debug, message);
    }

    /// Dropped unless the verbose gate is open
    #[inline]
    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogKind::Verbose, message);
    }

    /// Banner line with `message` centered in a rule of `=`
    #[inline]
    pub fn separator(&self, message: impl Into<String>) {
        self.log(LogKind::Separator, message);
    }

    #[inline]
    pub fn empty_line(&self) {
        self.log(LogKind::Empty, String::new());
    }

    /// Log `Ok` values as Information and `Err` values as Error
    pub fn write_ret_val<T, E>(&self, result: &std::result::Result<T, E>)
    where
        T: fmt::Display,
        E: fmt::Display,
    {
        match result {
            Ok(value) => self.info(value.to_string()),
            Err(err) => self.error(err.to_string()),
        }
    }

    /// Drain the queue now.
    ///
    /// Returns the number of records drained. Sink failures since the last
    /// explicit flush, including those hit by write-triggered flushes, are
    /// returned as [`LoggerError::SinkFailures`]; the records still reached
    /// the running log and every healthy sink.
    pub fn flush_log(&self) -> Result<usize> {
        let mut state = self.state.lock();
        let drained = self.flush_locked(&mut state, FlushTrigger::Explicit);
        let failures = std::mem::take(&mut state.unreported);
        if failures.is_empty() {
            Ok(drained)
        } else {
            Err(LoggerError::SinkFailures { failures })
        }
    }

    /// Render the session history.
    ///
    /// Pending records are flushed first. With `as_html` the result is a
    /// standalone HTML document, otherwise plain text with markup stripped.
    /// Verbose records are skipped unless `include_verbose`; the history
    /// itself is never modified.
    pub fn running_log(&self, as_html: bool, include_verbose: bool) -> String {
        let mut state = self.state.lock();
        self.flush_locked(&mut state, FlushTrigger::Explicit);
        if as_html {
            report::render_html_document(&state.history, include_verbose)
        } else {
            report::render_plain(&state.history, include_verbose)
        }
    }

    /// Render the session history as a styled HTML table fragment
    pub fn to_html_table(&self, include_verbose: bool) -> String {
        let mut state = self.state.lock();
        self.flush_locked(&mut state, FlushTrigger::Explicit);
        report::render_html_table(&state.history, include_verbose)
    }

    /// Write the end marker (when logging to a file) and flush everything.
    ///
    /// Only the first call does any work.
    pub fn dispose(&self) -> Result<()> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let marker = self
            .config
            .log_to_file
            .then(|| LogRecord::new(LogKind::Information, END_LOGGING_MARKER));

        let failures = {
            let mut state = self.state.lock();
            if let Some(marker) = &marker {
                state.pending.push_back(marker.clone());
                self.metrics.record_enqueued();
            }
            self.flush_locked(&mut state, FlushTrigger::Dispose);
            // Diagnostics raised by the final flush get one more pass.
            if !state.pending.is_empty() {
                self.flush_locked(&mut state, FlushTrigger::Dispose);
            }
            std::mem::take(&mut state.unreported)
        };

        if let Some(marker) = &marker {
            self.echo(marker);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::SinkFailures { failures })
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Effective configuration; file logging is off here if it was degraded
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Why the engine runs with fewer sinks than configured, if it does
    pub fn degradation(&self) -> Option<&Degradation> {
        self.degradation.as_ref()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Copy of the flushed history; pending records are not included
    pub fn snapshot(&self) -> RunningLog {
        self.state.lock().history.clone()
    }

    pub fn set_end_date(&self, end_date: DateTime<Local>) {
        self.state.lock().history.set_end_date(end_date);
    }

    /// Permanently remove Verbose records from the history
    pub fn purge_verbose(&self) -> usize {
        self.state.lock().history.remove_verbose()
    }

    fn passes_gate(&self, kind: LogKind) -> bool {
        match kind {
            LogKind::Verbose => self.config.verbose,
            LogKind::Debug => self.config.debug,
            _ => true,
        }
    }

    fn enqueue_locked(&self, state: &mut EngineState, record: LogRecord) {
        state.pending.push_back(record);
        self.metrics.record_enqueued();

        let trigger = self
            .config
            .flush_policy
            .evaluate(state.pending.len(), state.last_flush.elapsed());
        if let Some(trigger) = trigger {
            self.flush_locked(state, trigger);
        }
    }

    /// Drain the whole queue into the history and the drain sinks.
    ///
    /// Returns immediately if a flush is already running. Returns the number
    /// of records drained.
    fn flush_locked(&self, state: &mut EngineState, trigger: FlushTrigger) -> usize {
        if state.flushing {
            return 0;
        }
        state.flushing = true;

        let EngineState {
            pending,
            history,
            sinks,
            ..
        } = &mut *state;

        let mut errors: Vec<Option<String>> = vec![None; sinks.len()];
        let mut drained = 0;
        while let Some(record) = pending.pop_front() {
            for (idx, sink) in sinks.iter_mut().enumerate() {
                if let Err(message) = guarded(|| sink.appender.append(&record)) {
                    self.metrics.record_sink_failure();
                    errors[idx].get_or_insert(message);
                }
            }
            history.append(record);
            drained += 1;
        }

        if drained > 0 {
            for (idx, sink) in sinks.iter_mut().enumerate() {
                if let Err(message) = guarded(|| sink.appender.flush(history)) {
                    self.metrics.record_sink_failure();
                    errors[idx].get_or_insert(message);
                }
            }
            self.metrics.record_flush(trigger);
            self.metrics.record_drained(drained);
        }

        let mut failures = Vec::new();
        let mut diagnostics = Vec::new();
        for (sink, error) in sinks.iter_mut().zip(errors) {
            match error {
                Some(message) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink '{}' failed during {} flush: {}",
                        sink.appender.name(),
                        trigger,
                        message
                    );
                    if !sink.failing {
                        diagnostics.push(format!(
                            "Log sink '{}' failed: {}",
                            sink.appender.name(),
                            message
                        ));
                    }
                    sink.failing = true;
                    failures.push(SinkFailure::new(sink.appender.name(), message));
                }
                None if drained > 0 => sink.failing = false,
                None => {}
            }
        }

        if trigger.resets_age_clock() {
            state.last_flush = Instant::now();
        }

        // Still flagged as flushing: these stay queued for the next flush.
        for diagnostic in diagnostics {
            self.enqueue_locked(state, LogRecord::new(LogKind::Error, diagnostic));
        }
        for failure in failures {
            SinkFailure::merge_into(&mut state.unreported, failure);
        }
        state.flushing = false;

        drained
    }

    /// Per-write sinks, called without the queue lock held
    fn echo(&self, record: &LogRecord) {
        if let Some(event_log) = &self.event_log {
            if let Err(message) = guarded(|| event_log.lock().append(record)) {
                self.metrics.record_sink_failure();
                eprintln!("[LOGGER ERROR] Sink 'event_log' failed: {}", message);
            }
        }
        if let Some(console) = &self.console {
            if let Err(message) = guarded(|| console.lock().append(record)) {
                self.metrics.record_sink_failure();
                eprintln!("[LOGGER ERROR] Sink 'console' failed: {}", message);
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Run a sink call, turning both errors and panics into a message
fn guarded(call: impl FnOnce() -> Result<()>) -> std::result::Result<(), String> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic_info) => Err(format!("panicked: {}", panic_message(panic_info.as_ref()))),
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(unix)]
fn register_exit_hook() {
    extern "C" fn dispose_global() {
        if let Some(logger) = GLOBAL.get() {
            if let Err(e) = logger.dispose() {
                eprintln!("[LOGGER ERROR] Failed to flush at process exit: {}", e);
            }
        }
    }

    // SAFETY: `dispose_global` captures nothing and only touches the static.
    if unsafe { libc::atexit(dispose_global) } != 0 {
        eprintln!("[LOGGER WARNING] Could not register exit hook; call dispose() before exiting");
    }
}

#[cfg(not(unix))]
fn register_exit_hook() {}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use runlog::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .copy_to_console(false)
///     .verbose(true)
///     .queue_size_threshold(50)
///     .max_queue_age(Duration::from_secs(5))
///     .build();
///
/// logger.verbose("kept because the verbose gate is open");
/// assert_eq!(logger.pending_count(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appenders: Vec<Box<dyn Appender>>,
    event_backend: Option<Box<dyn EventLogBackend>>,
    degradation: Option<Degradation>,
}

impl LoggerBuilder {
    /// Create a builder with the console-only defaults
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            appenders: Vec::new(),
            event_backend: None,
            degradation: None,
        }
    }

    /// Enable the file sink writing `file_name` inside `dir`.
    ///
    /// `dir` must already exist when the logger is built.
    #[must_use = "builder methods return a new value"]
    pub fn log_to_file(mut self, dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        self.config.log_to_file = true;
        self.config.log_dir = dir.into();
        self.config.log_file_name = file_name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn copy_to_console(mut self, enabled: bool) -> Self {
        self.config.copy_to_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn append_to_day_file(mut self, enabled: bool) -> Self {
        self.config.append_to_day_file = enabled;
        self
    }

    /// Write the file sink as JSON documents instead of text lines
    #[must_use = "builder methods return a new value"]
    pub fn use_json(mut self, enabled: bool) -> Self {
        self.config.use_json = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_size_threshold(mut self, threshold: usize) -> Self {
        self.config.flush_policy.queue_size_threshold = threshold;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_queue_age(mut self, age: Duration) -> Self {
        self.config.flush_policy.max_queue_age = age;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.config.flush_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn event_log(mut self, routing: EventLogConfig) -> Self {
        self.config.event_log = routing;
        self
    }

    /// Replace the platform event log backend
    #[must_use = "builder methods return a new value"]
    pub fn event_log_backend<B: EventLogBackend + 'static>(mut self, backend: B) -> Self {
        self.event_backend = Some(Box::new(backend));
        self
    }

    /// Add a drain sink fed on every flush
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub(crate) fn degraded(mut self, reason: Degradation) -> Self {
        self.degradation = Some(reason);
        self
    }

    /// Build the Logger.
    ///
    /// Never fails: if the file sink cannot be set up, file logging is turned
    /// off, a diagnostic banner is printed and the engine runs console-only.
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            mut config,
            appenders,
            event_backend,
            mut degradation,
        } = self;

        let mut sinks = Vec::new();
        if config.log_to_file {
            match open_file_sink(&config) {
                Ok(sink) => sinks.push(sink),
                Err(reason) => {
                    config.log_to_file = false;
                    degradation = Some(reason);
                }
            }
        }
        sinks.extend(appenders);

        if let Some(reason) = &degradation {
            ConsoleAppender::print_banner(&reason.to_string());
        }

        let console = config
            .copy_to_console
            .then(|| Mutex::new(ConsoleAppender::new()));
        let event_log = config.event_log.enabled.then(|| {
            Mutex::new(EventLogAppender::new(
                config.event_log.clone(),
                event_backend.unwrap_or_else(default_backend),
            ))
        });

        let logger = Logger {
            state: Mutex::new(EngineState {
                pending: VecDeque::new(),
                last_flush: Instant::now(),
                flushing: false,
                history: RunningLog::new(),
                sinks: sinks
                    .into_iter()
                    .map(|appender| DrainSink {
                        appender,
                        failing: false,
                    })
                    .collect(),
                unreported: Vec::new(),
            }),
            config,
            degradation,
            console,
            event_log,
            metrics: LoggerMetrics::new(),
            disposed: AtomicBool::new(false),
        };

        if let Some(reason) = &logger.degradation {
            logger.warning(reason.to_string());
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn open_file_sink(config: &LoggerConfig) -> std::result::Result<Box<dyn Appender>, Degradation> {
    if !config.log_dir.is_dir() {
        return Err(Degradation::MissingLogDirectory(config.log_dir.clone()));
    }

    let path = config.log_path();
    let sink: Result<Box<dyn Appender>> = if config.use_json {
        JsonAppender::new(&path, config.append_to_day_file)
            .map(|appender| Box::new(appender) as Box<dyn Appender>)
    } else {
        FileAppender::new(&path, config.append_to_day_file)
            .map(|appender| Box::new(appender) as Box<dyn Appender>)
    };
    sink.map_err(|e| Degradation::LogFileUnavailable {
        path,
        reason: e.to_string(),
    })
}
