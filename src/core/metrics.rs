//! Dispatch metrics for observability
//!
//! Counters describing how entries moved through the dispatcher and how
//! often handlers or flushes failed. An entry finalized at a level with no
//! handlers is not counted anywhere: it leaves no trace at all.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatcher observability
///
/// # Example
///
/// ```
/// use rust_log_dispatch::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_invocation();
/// metrics.record_handler_failure();
///
/// assert_eq!(metrics.entries_dispatched(), 1);
/// assert_eq!(metrics.handler_failures(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Entries that resolved to at least one handler
    entries_dispatched: AtomicU64,

    /// Individual handler calls
    handler_invocations: AtomicU64,

    /// Handler calls that returned an error or panicked
    handler_failures: AtomicU64,

    /// Flush calls that returned an error or panicked
    flush_failures: AtomicU64,
}

impl DispatchMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_dispatched: AtomicU64::new(0),
            handler_invocations: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_dispatched(&self) -> u64 {
        self.entries_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_invocations(&self) -> u64 {
        self.handler_invocations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_invocation(&self) -> u64 {
        self.handler_invocations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Handler failures as a percentage of invocations (0.0 - 100.0)
    ///
    /// Returns 0.0 if no handler has been invoked.
    pub fn failure_rate(&self) -> f64 {
        let invocations = self.handler_invocations() as f64;
        if invocations == 0.0 {
            0.0
        } else {
            (self.handler_failures() as f64 / invocations) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_dispatched.store(0, Ordering::Relaxed);
        self.handler_invocations.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_dispatched: AtomicU64::new(self.entries_dispatched()),
            handler_invocations: AtomicU64::new(self.handler_invocations()),
            handler_failures: AtomicU64::new(self.handler_failures()),
            flush_failures: AtomicU64::new(self.flush_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.entries_dispatched(), 0);
        assert_eq!(metrics.handler_invocations(), 0);
        assert_eq!(metrics.handler_failures(), 0);
        assert_eq!(metrics.flush_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.record_dispatched(), 0);
        assert_eq!(metrics.record_dispatched(), 1);
        assert_eq!(metrics.entries_dispatched(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = DispatchMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..4 {
            metrics.record_invocation();
        }
        metrics.record_handler_failure();

        let rate = metrics.failure_rate();
        assert!((24.9..=25.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = DispatchMetrics::new();
        metrics.record_dispatched();
        metrics.record_flush_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.entries_dispatched(), 0);
        assert_eq!(snapshot.entries_dispatched(), 1);
        assert_eq!(snapshot.flush_failures(), 1);
    }
}
