//! Backpressure configuration and ingest metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Backpressure configuration for the inertial sample channel
#[derive(Debug, Clone)]
pub struct BackpressureConfig {
    /// Channel capacity
    pub channel_capacity: usize,
}

impl Default for BackpressureConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// Ingest metrics shared between pipelines and the orchestrator
#[derive(Debug, Default)]
pub struct IngestMetrics {
    /// Inertial samples received from the source
    pub samples_received: AtomicU64,

    /// Inertial samples dropped on a full channel
    pub samples_dropped: AtomicU64,

    /// Sentinel markers received before the stream started
    pub sentinels_received: AtomicU64,

    /// Camera frames received from the source
    pub frames_received: AtomicU64,

    /// Camera frames evicted from a full queue
    pub frames_dropped: AtomicU64,
}

impl IngestMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an inertial sample arrival
    pub fn record_sample(&self) {
        self.samples_received.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("vio_bridge_samples_received_total").increment(1);
    }

    /// Record an inertial sample dropped on a full channel
    pub fn record_sample_dropped(&self) {
        self.samples_dropped.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("vio_bridge_samples_dropped_total").increment(1);
    }

    /// Record a not-yet-started sentinel
    pub fn record_sentinel(&self) {
        self.sentinels_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a camera frame arrival
    pub fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("vio_bridge_frames_received_total").increment(1);
    }

    /// Record camera frames evicted from a full queue
    pub fn record_frames_dropped(&self, count: u64) {
        if count > 0 {
            self.frames_dropped.fetch_add(count, Ordering::Relaxed);
            metrics::counter!("vio_bridge_frames_evicted_total").increment(count);
        }
    }
}
