//! SinkHandle - manages a sink with isolated queue and worker task

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

use contracts::{MessageSink, OutputSink, Timestamped};

use crate::metrics::SinkMetrics;

/// Handle to a running sink worker
pub struct SinkHandle<M> {
    /// Sink name
    name: String,
    /// Channel to send messages to the worker
    tx: mpsc::Sender<M>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

impl<M> SinkHandle<M>
where
    M: Timestamped + Send + 'static,
{
    /// Create a new SinkHandle and spawn the worker task
    pub fn spawn<S>(sink: S, queue_capacity: usize) -> Self
    where
        S: MessageSink<M> + Send + 'static,
    {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            sink_worker(sink, rx, worker_metrics, worker_name).await;
        });

        Self {
            name,
            tx,
            metrics,
            worker_handle,
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Send a message to the sink (non-blocking)
    ///
    /// Returns true if queued, false if the queue was full (message dropped)
    pub fn try_send(&self, message: M) -> bool {
        try_send_inner(&self.name, &self.tx, &self.metrics, message)
    }

    /// Get a lightweight sender to register with the output publisher.
    ///
    /// Ports share the worker queue; the worker only exits once the handle
    /// and every port are gone.
    pub fn port(&self) -> SinkPort<M> {
        SinkPort {
            name: self.name.clone(),
            tx: self.tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Shutdown the sink worker gracefully
    ///
    /// Drop all ports first; the worker drains the queue before exiting.
    #[instrument(name = "sink_handle_shutdown", skip(self))]
    pub async fn shutdown(self) {
        // Drop sender to signal worker to stop
        drop(self.tx);
        // Wait for worker to finish
        if let Err(e) = self.worker_handle.await {
            error!(sink = %self.name, error = ?e, "Worker task panicked");
        }
        debug!(sink = %self.name, "SinkHandle shutdown complete");
    }
}

/// Cloneable sender half of a [`SinkHandle`].
///
/// Implements the synchronous `OutputSink` seam the bridge publisher fans out
/// through.
pub struct SinkPort<M> {
    name: String,
    tx: mpsc::Sender<M>,
    metrics: Arc<SinkMetrics>,
}

impl<M> Clone for SinkPort<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tx: self.tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<M> OutputSink<M> for SinkPort<M>
where
    M: Timestamped + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn try_publish(&mut self, message: M) -> bool {
        try_send_inner(&self.name, &self.tx, &self.metrics, message)
    }
}

fn try_send_inner<M: Timestamped>(
    name: &str,
    tx: &mpsc::Sender<M>,
    metrics: &SinkMetrics,
    message: M,
) -> bool {
    match tx.try_send(message) {
        Ok(()) => {
            // Approximation from the sender side
            metrics.set_queue_depth(tx.max_capacity() - tx.capacity());
            true
        }
        Err(mpsc::error::TrySendError::Full(m)) => {
            metrics.record_drop();
            warn!(
                sink = %name,
                timestamp = m.timestamp(),
                "Queue full, message dropped"
            );
            false
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            error!(sink = %name, "Sink worker closed unexpectedly");
            false
        }
    }
}

/// Worker task that consumes messages and writes to the sink
#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx, metrics),
    fields(sink = %name)
)]
async fn sink_worker<M, S>(
    mut sink: S,
    mut rx: mpsc::Receiver<M>,
    metrics: Arc<SinkMetrics>,
    name: String,
) where
    M: Timestamped + Send + 'static,
    S: MessageSink<M> + Send,
{
    debug!(sink = %name, "Sink worker started");

    while let Some(message) = rx.recv().await {
        metrics.set_queue_depth(rx.len());

        match sink.write(&message).await {
            Ok(()) => {
                metrics.record_write();
            }
            Err(e) => {
                metrics.record_failure();
                error!(
                    sink = %name,
                    timestamp = message.timestamp(),
                    error = %e,
                    "Write failed"
                );
                // Continue processing - don't crash on single failure
            }
        }
    }

    // Cleanup
    if let Err(e) = sink.flush().await {
        error!(sink = %name, error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = sink.close().await {
        error!(sink = %name, error = %e, "Close failed on shutdown");
    }

    debug!(sink = %name, "Sink worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{BridgeError, PoseMessage, QuatWxyzF, Vec3f};
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::time::{sleep, Duration};

    /// Mock sink for testing
    struct MockSink {
        name: String,
        write_count: Arc<AtomicU64>,
        should_fail: bool,
        delay_ms: u64,
    }

    impl MessageSink<PoseMessage> for MockSink {
        fn name(&self) -> &str {
            &self.name
        }

        async fn write(&mut self, _message: &PoseMessage) -> Result<(), BridgeError> {
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.should_fail {
                return Err(BridgeError::sink_write(&self.name, "mock failure"));
            }
            self.write_count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    fn pose(t: f64) -> PoseMessage {
        PoseMessage {
            timestamp: t,
            position: Vec3f::default(),
            orientation: QuatWxyzF::default(),
        }
    }

    #[tokio::test]
    async fn test_sink_handle_basic() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "test".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
            delay_ms: 0,
        };

        let handle = SinkHandle::spawn(sink, 10);

        for i in 0..5 {
            assert!(handle.try_send(pose(i as f64)));
        }

        handle.shutdown().await;
        assert_eq!(write_count.load(Ordering::Relaxed), 5);
    }

    #[tokio::test]
    async fn test_sink_handle_queue_full() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "slow".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
            delay_ms: 100, // Slow sink
        };

        // Small queue capacity
        let handle = SinkHandle::spawn(sink, 2);

        // Send more than the queue can hold
        for i in 0..10 {
            handle.try_send(pose(i as f64));
        }

        // Some should have been dropped
        assert!(handle.metrics().dropped_count() > 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sink_handle_failure_isolation() {
        let sink = MockSink {
            name: "failing".to_string(),
            write_count: Arc::new(AtomicU64::new(0)),
            should_fail: true,
            delay_ms: 0,
        };

        let handle = SinkHandle::spawn(sink, 10);

        for i in 0..3 {
            handle.try_send(pose(i as f64));
        }

        // Give worker time to process
        sleep(Duration::from_millis(50)).await;

        // Should have recorded failures
        assert!(handle.metrics().failure_count() > 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_port_feeds_the_same_worker() {
        let write_count = Arc::new(AtomicU64::new(0));
        let sink = MockSink {
            name: "ported".to_string(),
            write_count: Arc::clone(&write_count),
            should_fail: false,
            delay_ms: 0,
        };

        let handle = SinkHandle::spawn(sink, 10);
        let mut port = handle.port();
        assert!(port.try_publish(pose(1.0)));
        drop(port);

        handle.shutdown().await;
        assert_eq!(write_count.load(Ordering::Relaxed), 1);
    }
}
