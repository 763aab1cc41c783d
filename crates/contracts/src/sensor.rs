//! Raw sensor data structures entering the bridge.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Camera slot id of the left eye when feeding the estimator
pub const LEFT_CAMERA_ID: usize = 0;

/// Camera slot id of the right eye when feeding the estimator
pub const RIGHT_CAMERA_ID: usize = 1;

/// Single inertial reading
///
/// Owned transiently by the ingest coordinator for the duration of one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Monotonic timestamp (seconds)
    pub timestamp: f64,

    /// Angular velocity (rad/s)
    pub angular_velocity: Vec3,

    /// Linear acceleration (m/s²)
    pub linear_acceleration: Vec3,
}

/// Timestamped pair of left/right camera images
///
/// Images are opaque buffers; the bridge never inspects pixel data.
/// `Bytes` keeps the payload clone cheap while the frame sits in the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StereoFrame {
    /// Monotonic capture timestamp (seconds)
    pub timestamp: f64,

    /// Left eye image buffer
    pub left: Bytes,

    /// Right eye image buffer
    pub right: Bytes,
}

impl StereoFrame {
    /// Construct a frame from timestamp and both eye buffers
    pub fn new(timestamp: f64, left: impl Into<Bytes>, right: impl Into<Bytes>) -> Self {
        Self {
            timestamp,
            left: left.into(),
            right: right.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_frame_clone_shares_buffers() {
        let frame = StereoFrame::new(1.5, vec![1u8; 64], vec![2u8; 64]);
        let copy = frame.clone();
        // Bytes clones share the underlying allocation
        assert_eq!(frame.left.as_ptr(), copy.left.as_ptr());
        assert_eq!(copy.timestamp, 1.5);
    }
}
