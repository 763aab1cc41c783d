//! Sensor source traits - data source abstraction
//!
//! Defines unified interfaces for the two input streams, decoupling the bridge
//! from concrete device backends. Mock sources and real device drivers share
//! the same API.

use std::sync::Arc;

use crate::{ImuSample, StereoFrame};

/// Inertial sample callback type
///
/// `None` is the "stream not yet started" sentinel; consumers must treat it as
/// a no-op, not an error.
pub type ImuSampleCallback = Arc<dyn Fn(Option<ImuSample>) + Send + Sync>;

/// Stereo frame callback type
pub type CameraFrameCallback = Arc<dyn Fn(StereoFrame) + Send + Sync>;

/// Inertial data source
///
/// # Design Principles
///
/// 1. **Decoupling**: separates sample generation from sample consumption
/// 2. **Unified interface**: mock and real sources use the same API
/// 3. **Callback pattern**: sources push; the bridge registers as the sole
///    consumer of the stream
pub trait ImuSource: Send + Sync {
    /// Get source name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Register the sample callback
    ///
    /// If already listening, repeated calls are idempotent (a second callback
    /// is not registered).
    fn listen(&self, callback: ImuSampleCallback);

    /// Stop producing samples
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}

/// Stereo camera data source
///
/// Same lifecycle contract as [`ImuSource`]; produces complete left/right
/// pairs at an arbitrary rate.
pub trait CameraSource: Send + Sync {
    /// Get source name
    fn name(&self) -> &str;

    /// Register the frame callback (idempotent)
    fn listen(&self, callback: CameraFrameCallback);

    /// Stop producing frames
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}

/// Non-blocking dequeue handle over the buffered camera stream.
///
/// The frame gate's only view of the camera queue: it may peek at the depth
/// and pop at most one frame, and must never block. The queue itself is an
/// external synchronized resource owned by the ingestion side.
pub trait FrameSource: Send {
    /// Dequeue the oldest buffered frame, if any. Never blocks.
    fn try_next(&mut self) -> Option<StereoFrame>;

    /// Current queue depth
    fn len(&self) -> usize;

    /// True when no frame is buffered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
