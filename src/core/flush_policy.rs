//! Flush policy for the pending queue
//!
//! A flush is triggered when the pending queue reaches a size threshold or
//! when the time since the last age-triggered flush exceeds a maximum age.

use std::fmt;
use std::time::Duration;

/// Default number of pending records that triggers a flush
pub const DEFAULT_QUEUE_SIZE_THRESHOLD: usize = 10;

/// Default maximum time records may wait in the queue
pub const DEFAULT_MAX_QUEUE_AGE: Duration = Duration::from_secs(30);

/// Size and age thresholds evaluated after every enqueue
///
/// # Example
///
/// ```
/// use runlog::FlushPolicy;
/// use std::time::Duration;
///
/// let policy = FlushPolicy::new(3, Duration::from_secs(5));
/// assert_eq!(policy.evaluate(3, Duration::ZERO), Some(runlog::FlushTrigger::Size));
/// assert_eq!(policy.evaluate(1, Duration::ZERO), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushPolicy {
    /// Flush when this many records are pending. Zero is treated as one.
    pub queue_size_threshold: usize,
    pub max_queue_age: Duration,
}

impl FlushPolicy {
    pub fn new(queue_size_threshold: usize, max_queue_age: Duration) -> Self {
        Self {
            queue_size_threshold,
            max_queue_age,
        }
    }

    /// Decide whether `pending` records, with `since_last_flush` elapsed on
    /// the age clock, must be flushed now.
    ///
    /// Age wins over size when both hold, since only an age-triggered flush
    /// resets the age clock.
    pub fn evaluate(&self, pending: usize, since_last_flush: Duration) -> Option<FlushTrigger> {
        if pending == 0 {
            return None;
        }
        if since_last_flush >= self.max_queue_age {
            Some(FlushTrigger::Age)
        } else if pending >= self.queue_size_threshold.max(1) {
            Some(FlushTrigger::Size)
        } else {
            None
        }
    }
}

impl Default for FlushPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_SIZE_THRESHOLD, DEFAULT_MAX_QUEUE_AGE)
    }
}

/// Why a flush happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushTrigger {
    /// Pending count reached the size threshold
    Size,
    /// Maximum queue age elapsed
    Age,
    /// Caller asked for it
    Explicit,
    /// Final flush while disposing
    Dispose,
}

impl FlushTrigger {
    /// Only the age trigger restarts the age clock
    pub fn resets_age_clock(&self) -> bool {
        matches!(self, FlushTrigger::Age)
    }
}

impl fmt::Display for FlushTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushTrigger::Size => write!(f, "Size"),
            FlushTrigger::Age => write!(f, "Age"),
            FlushTrigger::Explicit => write!(f, "Explicit"),
            FlushTrigger::Dispose => write!(f, "Dispose"),
        }
    }
}
