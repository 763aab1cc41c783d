//! Mock estimator implementation
//!
//! Implements `VioEstimator` with a deterministic kinematic model. Used for
//! development and testing without the real estimation engine.

use bytes::Bytes;
use contracts::{EstimatorSnapshot, QuatXyzw, Vec3, VioEstimator};
use tracing::{debug, trace};

/// Mock estimator configuration
#[derive(Debug, Clone)]
pub struct MockEstimatorConfig {
    /// Number of stereo updates before `initialized()` turns true
    pub init_after_stereo: u64,

    /// Fixed camera-to-IMU time offset reported in snapshots (seconds)
    pub time_offset: f64,

    /// Poison the snapshot position with NaN starting at this stereo update
    /// (1-based), for fault-path testing
    pub nan_after_stereo: Option<u64>,
}

impl Default for MockEstimatorConfig {
    fn default() -> Self {
        Self {
            init_after_stereo: 3,
            time_offset: -0.002,
            nan_after_stereo: None,
        }
    }
}

/// Deterministic mock of the visual-inertial engine.
///
/// Integrates incoming inertial samples with a trivial kinematic model so the
/// snapshot evolves plausibly, reports itself initialized after a configured
/// number of stereo updates, and can inject a NaN into the state to exercise
/// the non-finite rejection path.
pub struct MockEstimator {
    config: MockEstimatorConfig,
    position: Vec3,
    velocity: Vec3,
    orientation: QuatXyzw,
    accel_bias: Vec3,
    gyro_bias: Vec3,
    last_inertial_timestamp: Option<f64>,
    inertial_count: u64,
    stereo_count: u64,
}

impl MockEstimator {
    /// Create a mock with the given configuration
    pub fn new(config: MockEstimatorConfig) -> Self {
        Self {
            config,
            position: Vec3::default(),
            velocity: Vec3::default(),
            orientation: QuatXyzw::identity(),
            accel_bias: Vec3::new(0.01, -0.01, 0.02),
            gyro_bias: Vec3::new(0.001, 0.002, -0.001),
            last_inertial_timestamp: None,
            inertial_count: 0,
            stereo_count: 0,
        }
    }

    /// Create a mock with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MockEstimatorConfig::default())
    }

    /// Inertial samples fed so far
    pub fn inertial_count(&self) -> u64 {
        self.inertial_count
    }

    /// Stereo frames fed so far
    pub fn stereo_count(&self) -> u64 {
        self.stereo_count
    }
}

impl VioEstimator for MockEstimator {
    fn feed_inertial(&mut self, timestamp: f64, angular_velocity: Vec3, linear_acceleration: Vec3) {
        self.inertial_count += 1;

        let dt = self
            .last_inertial_timestamp
            .map(|last| (timestamp - last).max(0.0))
            .unwrap_or(0.0);
        self.last_inertial_timestamp = Some(timestamp);

        if dt == 0.0 {
            return;
        }

        // Gravity-compensated first-order integration, enough to keep the
        // state moving and finite
        let accel = Vec3::new(
            linear_acceleration.x,
            linear_acceleration.y,
            linear_acceleration.z + 9.81,
        );
        self.velocity.x += accel.x * dt;
        self.velocity.y += accel.y * dt;
        self.velocity.z += accel.z * dt;
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
        self.position.z += self.velocity.z * dt;

        // Small-angle yaw update keeps the quaternion unit-ish without a full
        // integration scheme
        let half = 0.5 * angular_velocity.z * dt;
        let (s, c) = half.sin_cos();
        let (z, w) = (self.orientation.z, self.orientation.w);
        self.orientation.z = z * c + w * s;
        self.orientation.w = w * c - z * s;

        trace!(timestamp, dt, "mock estimator inertial update");
    }

    fn feed_stereo(
        &mut self,
        timestamp: f64,
        left: &Bytes,
        right: &Bytes,
        _left_id: usize,
        _right_id: usize,
    ) {
        self.stereo_count += 1;

        if let Some(at) = self.config.nan_after_stereo {
            if self.stereo_count >= at {
                self.position.x = f64::NAN;
            }
        }

        if self.stereo_count == self.config.init_after_stereo {
            debug!(
                timestamp,
                stereo_count = self.stereo_count,
                "mock estimator initialized"
            );
        }

        trace!(
            timestamp,
            left_bytes = left.len(),
            right_bytes = right.len(),
            "mock estimator stereo update"
        );
    }

    fn snapshot(&self) -> EstimatorSnapshot {
        EstimatorSnapshot {
            position: self.position,
            velocity: self.velocity,
            orientation: self.orientation,
            accel_bias: self.accel_bias,
            gyro_bias: self.gyro_bias,
            cam_imu_time_offset: self.config.time_offset,
        }
    }

    fn initialized(&self) -> bool {
        self.stereo_count >= self.config.init_after_stereo
    }
}
