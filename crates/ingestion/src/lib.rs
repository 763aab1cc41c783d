//! # Ingestion
//!
//! Sensor-side plumbing in front of the bridge core.
//!
//! Responsibilities:
//! - Bridge `ImuSource` callbacks into a bounded sample channel
//! - Buffer camera frames in an arrival-order queue with back-pressure
//! - Provide mock sources for development without real devices
//!
//! ## Usage
//!
//! ```ignore
//! use ingestion::{CameraPipeline, ImuPipeline, SharedFrameQueue};
//!
//! let mut imu = ImuPipeline::new(256);
//! imu.attach(Box::new(imu_source));
//! let samples = imu.take_receiver().unwrap();
//!
//! let queue = SharedFrameQueue::with_capacity(8);
//! let mut cam = CameraPipeline::new(queue.clone());
//! cam.attach(Box::new(camera_source));
//!
//! imu.start();
//! cam.start();
//! while let Ok(sample) = samples.recv().await {
//!     // feed the bridge
//! }
//! ```

mod config;
mod frame_queue;
mod mock;
mod pipeline;

pub use config::{BackpressureConfig, IngestMetrics};
pub use frame_queue::{FrameQueue, SharedFrameQueue};
pub use mock::{MockCameraSource, MockCameraSourceConfig, MockImuSource, MockImuSourceConfig};
pub use pipeline::{CameraPipeline, ImuPipeline};

pub use contracts::{CameraSource, FrameSource, ImuSample, ImuSource, StereoFrame};
