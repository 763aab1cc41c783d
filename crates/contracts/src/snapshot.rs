//! EstimatorSnapshot - read-only view of the estimator state.

use serde::{Deserialize, Serialize};

use crate::{QuatXyzw, Vec3};

/// Immutable read of the estimator state taken after a stereo update.
///
/// Values are only meaningful once the estimator reports itself initialized;
/// before that the fields hold whatever the warm-up produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorSnapshot {
    /// Position in the world frame (meters)
    pub position: Vec3,

    /// Velocity in the world frame (m/s)
    pub velocity: Vec3,

    /// Orientation, estimator component order (x, y, z, w)
    pub orientation: QuatXyzw,

    /// Accelerometer bias estimate (m/s²)
    pub accel_bias: Vec3,

    /// Gyroscope bias estimate (rad/s)
    pub gyro_bias: Vec3,

    /// Estimated camera-to-IMU clock offset (seconds, signed)
    pub cam_imu_time_offset: f64,
}
