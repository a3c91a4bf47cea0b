//! Logger metrics for observability
//!
//! Counters describing how the engine has behaved so far: how many records
//! were accepted or gated out, how many flushes each trigger caused, and how
//! many sink writes failed.

use super::flush_policy::FlushTrigger;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use runlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.enqueued_count(), 1);
/// assert_eq!(metrics.filtered_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted into the pending queue
    enqueued: AtomicU64,

    /// Verbose/Debug records dropped by a severity gate
    filtered: AtomicU64,

    /// Records moved from the queue into the running log
    drained: AtomicU64,

    size_flushes: AtomicU64,
    age_flushes: AtomicU64,
    explicit_flushes: AtomicU64,

    /// Failed sink writes (drain sinks, console and event log)
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            drained: AtomicU64::new(0),
            size_flushes: AtomicU64::new(0),
            age_flushes: AtomicU64::new(0),
            explicit_flushes: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn drained_count(&self) -> u64 {
        self.drained.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn size_flushes(&self) -> u64 {
        self.size_flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn age_flushes(&self) -> u64 {
        self.age_flushes.load(Ordering::Relaxed)
    }

    /// Explicit and dispose flushes
    #[inline]
    pub fn explicit_flushes(&self) -> u64 {
        self.explicit_flushes.load(Ordering::Relaxed)
    }

    /// Total flushes that drained at least one record
    pub fn total_flushes(&self) -> u64 {
        self.size_flushes() + self.age_flushes() + self.explicit_flushes()
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_drained(&self, count: usize) -> u64 {
        self.drained.fetch_add(count as u64, Ordering::Relaxed)
    }

    /// Record a completed flush by its trigger
    pub fn record_flush(&self, trigger: FlushTrigger) -> u64 {
        let counter = match trigger {
            FlushTrigger::Size => &self.size_flushes,
            FlushTrigger::Age => &self.age_flushes,
            FlushTrigger::Explicit | FlushTrigger::Dispose => &self.explicit_flushes,
        };
        counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.drained.store(0, Ordering::Relaxed);
        self.size_flushes.store(0, Ordering::Relaxed);
        self.age_flushes.store(0, Ordering::Relaxed);
        self.explicit_flushes.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            drained: AtomicU64::new(self.drained_count()),
            size_flushes: AtomicU64::new(self.size_flushes()),
            age_flushes: AtomicU64::new(self.age_flushes()),
            explicit_flushes: AtomicU64::new(self.explicit_flushes()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}
