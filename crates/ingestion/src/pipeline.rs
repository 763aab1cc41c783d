//! Ingestion pipelines - source callbacks to bridge-facing handles.

use std::sync::Arc;

use async_channel::{bounded, Receiver, Sender, TrySendError};
use contracts::{CameraSource, ImuSample, ImuSource};
use tracing::{debug, info, instrument, warn};

use crate::config::{BackpressureConfig, IngestMetrics};
use crate::frame_queue::SharedFrameQueue;

/// Bridges an [`ImuSource`] callback into a bounded sample channel.
///
/// The channel carries `Option<ImuSample>` so not-yet-started sentinels reach
/// the coordinator unchanged. A full channel drops the newest sample: the
/// inertial stream must never block the capture side, and the coordinator
/// prefers fresh samples over a growing backlog.
pub struct ImuPipeline {
    source: Option<Box<dyn ImuSource>>,
    metrics: Arc<IngestMetrics>,
    tx: Sender<Option<ImuSample>>,
    rx: Option<Receiver<Option<ImuSample>>>,
}

impl ImuPipeline {
    /// Create a pipeline with the given channel capacity
    pub fn new(channel_capacity: usize) -> Self {
        let (tx, rx) = bounded(channel_capacity.max(1));
        Self {
            source: None,
            metrics: Arc::new(IngestMetrics::new()),
            tx,
            rx: Some(rx),
        }
    }

    /// Create from a backpressure configuration
    pub fn with_config(config: BackpressureConfig) -> Self {
        Self::new(config.channel_capacity)
    }

    /// Attach the inertial source
    ///
    /// The bridge registers as the sole consumer of the stream; attaching a
    /// second source replaces the first (after stopping it).
    #[instrument(name = "imu_pipeline_attach", skip(self, source), fields(source = source.name()))]
    pub fn attach(&mut self, source: Box<dyn ImuSource>) {
        if let Some(old) = self.source.take() {
            warn!(old = old.name(), "replacing attached imu source");
            old.stop();
        }
        debug!("imu source attached");
        self.source = Some(source);
    }

    /// Start streaming samples into the channel
    #[instrument(name = "imu_pipeline_start", skip(self))]
    pub fn start(&self) {
        let Some(source) = &self.source else {
            warn!("no imu source attached");
            return;
        };
        if source.is_listening() {
            return;
        }

        let tx = self.tx.clone();
        let metrics = self.metrics.clone();
        let name = source.name().to_string();

        info!(source = %name, "starting imu pipeline");
        source.listen(Arc::new(move |sample| {
            match sample {
                None => metrics.record_sentinel(),
                Some(_) => metrics.record_sample(),
            }
            match tx.try_send(sample) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    metrics.record_sample_dropped();
                }
                Err(TrySendError::Closed(_)) => {
                    warn!(source = %name, "imu channel closed");
                }
            }
        }));
    }

    /// Stop the attached source
    #[instrument(name = "imu_pipeline_stop", skip(self))]
    pub fn stop(&self) {
        if let Some(source) = &self.source {
            if source.is_listening() {
                debug!(source = source.name(), "stopping imu pipeline");
                source.stop();
            }
        }
    }

    /// Get the sample receiver
    ///
    /// Note: can only be called once, subsequent calls return None.
    pub fn take_receiver(&mut self) -> Option<Receiver<Option<ImuSample>>> {
        self.rx.take()
    }

    /// Get metrics reference
    pub fn metrics(&self) -> Arc<IngestMetrics> {
        self.metrics.clone()
    }
}

impl Drop for ImuPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Bridges a [`CameraSource`] callback into the shared frame queue.
pub struct CameraPipeline {
    source: Option<Box<dyn CameraSource>>,
    metrics: Arc<IngestMetrics>,
    queue: SharedFrameQueue,
}

impl CameraPipeline {
    /// Create a pipeline feeding the given queue
    pub fn new(queue: SharedFrameQueue) -> Self {
        Self {
            source: None,
            metrics: Arc::new(IngestMetrics::new()),
            queue,
        }
    }

    /// Attach the camera source (replaces and stops a previous one)
    #[instrument(name = "camera_pipeline_attach", skip(self, source), fields(source = source.name()))]
    pub fn attach(&mut self, source: Box<dyn CameraSource>) {
        if let Some(old) = self.source.take() {
            warn!(old = old.name(), "replacing attached camera source");
            old.stop();
        }
        debug!("camera source attached");
        self.source = Some(source);
    }

    /// Start streaming frames into the queue
    #[instrument(name = "camera_pipeline_start", skip(self))]
    pub fn start(&self) {
        let Some(source) = &self.source else {
            warn!("no camera source attached");
            return;
        };
        if source.is_listening() {
            return;
        }

        let queue = self.queue.clone();
        let metrics = self.metrics.clone();
        let name = source.name().to_string();

        info!(source = %name, "starting camera pipeline");
        source.listen(Arc::new(move |frame| {
            metrics.record_frame();
            let before = queue.dropped_count();
            queue.push(frame);
            metrics.record_frames_dropped(queue.dropped_count() - before);
        }));
    }

    /// Stop the attached source
    #[instrument(name = "camera_pipeline_stop", skip(self))]
    pub fn stop(&self) {
        if let Some(source) = &self.source {
            if source.is_listening() {
                debug!(source = source.name(), "stopping camera pipeline");
                source.stop();
            }
        }
    }

    /// Get metrics reference
    pub fn metrics(&self) -> Arc<IngestMetrics> {
        self.metrics.clone()
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}
