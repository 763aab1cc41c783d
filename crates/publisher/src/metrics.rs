//! Per-sink delivery counters.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Delivery counters for one sink worker.
///
/// Shared between the sender side (drops) and the worker side (writes,
/// failures); all updates are relaxed, the numbers are advisory.
#[derive(Debug, Default)]
pub struct SinkMetrics {
    written: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
    queue_depth: AtomicUsize,
}

impl SinkMetrics {
    /// Create a zeroed counter block
    pub fn new() -> Self {
        Self::default()
    }

    /// One message written successfully
    pub fn record_write(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    /// One write returned an error
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// One message dropped before reaching the worker (queue full)
    pub fn record_drop(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Update the observed worker queue depth
    pub fn set_queue_depth(&self, depth: usize) {
        self.queue_depth.store(depth, Ordering::Relaxed);
    }

    /// Messages written successfully
    pub fn write_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Writes that returned an error
    pub fn failure_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Messages dropped on a full queue
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Last observed queue depth
    pub fn queue_depth(&self) -> usize {
        self.queue_depth.load(Ordering::Relaxed)
    }

    /// Consistent-enough copy for reporting
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            written: self.write_count(),
            failed: self.failure_count(),
            dropped: self.dropped_count(),
            queue_depth: self.queue_depth(),
        }
    }
}

/// Point-in-time copy of [`SinkMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub written: u64,
    pub failed: u64,
    pub dropped: u64,
    pub queue_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counters() {
        let metrics = SinkMetrics::new();
        metrics.record_write();
        metrics.record_write();
        metrics.record_failure();
        metrics.record_drop();
        metrics.set_queue_depth(3);

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                written: 2,
                failed: 1,
                dropped: 1,
                queue_depth: 3,
            }
        );
    }
}
