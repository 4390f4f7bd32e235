//! Logger metrics for observability
//!
//! Emission never reports failures to the caller, so these counters are the
//! only place where filtered records, failed sink writes and lost mirror
//! datagrams become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what the logger did with each call
///
/// # Example
///
/// ```
/// use fieldlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_write_error();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.write_errors(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted by the level gate and written to the primary sink
    emitted: AtomicU64,

    /// Calls rejected by the level gate
    filtered: AtomicU64,

    /// Primary sink writes that returned an error
    write_errors: AtomicU64,

    /// Datagrams handed to the mirror socket
    mirror_sent: AtomicU64,

    /// Mirror records lost to a full queue or a failed send
    mirror_dropped: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            mirror_sent: AtomicU64::new(0),
            mirror_dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mirror_sent(&self) -> u64 {
        self.mirror_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mirror_dropped(&self) -> u64 {
        self.mirror_dropped.load(Ordering::Relaxed)
    }

    /// Returns the previous value, as do all `record_*` methods
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_mirror_sent(&self) -> u64 {
        self.mirror_sent.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_mirror_dropped(&self) -> u64 {
        self.mirror_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of mirror records that never left the process, as a percentage
    ///
    /// Returns 0.0 if nothing was mirrored.
    pub fn mirror_drop_rate(&self) -> f64 {
        let dropped = self.mirror_dropped() as f64;
        let total = self.mirror_sent() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
        self.mirror_sent.store(0, Ordering::Relaxed);
        self.mirror_dropped.store(0, Ordering::Relaxed);
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
            emitted: AtomicU64::new(self.emitted()),
            filtered: AtomicU64::new(self.filtered()),
            write_errors: AtomicU64::new(self.write_errors()),
            mirror_sent: AtomicU64::new(self.mirror_sent()),
            mirror_dropped: AtomicU64::new(self.mirror_dropped()),
        }
    }
}
