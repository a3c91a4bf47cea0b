//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord, running_log::RunningLog};

/// A sink fed by the engine.
///
/// Drain sinks receive `append` once per record, in queue order, while a
/// flush runs; `flush` is called once after the whole batch has been moved
/// into the running log, with the updated history.
pub trait Appender: Send {
    fn append(&mut self, record: &LogRecord) -> Result<()>;

    fn flush(&mut self, _history: &RunningLog) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
