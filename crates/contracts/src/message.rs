//! Output message shapes handed to downstream sinks.

use serde::{Deserialize, Serialize};

use crate::{QuatWxyz, QuatWxyzF, Vec3, Vec3f};

/// Anything carrying the dispatched frame's timestamp.
///
/// Lets generic sinks label records without knowing the concrete message.
pub trait Timestamped {
    /// Timestamp of the dispatched frame this message derives from (seconds)
    fn timestamp(&self) -> f64;
}

/// Low-rate pose update published after each dispatched stereo frame
///
/// Stamped with the dispatched frame's timestamp, not the inertial sample
/// that triggered the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseMessage {
    /// Dispatched frame timestamp (seconds)
    pub timestamp: f64,

    /// Position, single precision
    pub position: Vec3f,

    /// Orientation, (w, x, y, z) order, single precision
    pub orientation: QuatWxyzF,
}

impl Timestamped for PoseMessage {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// Static IMU noise model, fixed at construction
///
/// Not derived per frame; published verbatim with every integrator input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuParams {
    /// Gyroscope white noise density
    pub gyro_noise: f64,

    /// Accelerometer white noise density
    pub accel_noise: f64,

    /// Gyroscope random walk
    pub gyro_walk: f64,

    /// Accelerometer random walk
    pub accel_walk: f64,

    /// Gravity vector in the world frame (m/s²)
    pub gravity: Vec3,

    /// Integration uncertainty scale
    pub integration_sigma: f64,

    /// Nominal inertial sample rate (Hz)
    pub nominal_rate_hz: f64,
}

impl Default for ImuParams {
    fn default() -> Self {
        Self {
            gyro_noise: 0.00016968,
            accel_noise: 0.002,
            gyro_walk: 1.9393e-05,
            accel_walk: 0.003,
            gravity: Vec3::new(0.0, 0.0, -9.81),
            integration_sigma: 1.0,
            nominal_rate_hz: 200.0,
        }
    }
}

/// State hand-off for a downstream IMU integrator
///
/// Double precision throughout; consumed by an integrator that propagates the
/// estimator state between camera frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorInputMessage {
    /// Dispatched frame timestamp (seconds)
    pub timestamp: f64,

    /// Estimated camera-to-IMU clock offset (seconds, signed)
    pub time_offset: f64,

    /// Static noise configuration
    pub imu_params: ImuParams,

    /// Accelerometer bias estimate
    pub accel_bias: Vec3,

    /// Gyroscope bias estimate
    pub gyro_bias: Vec3,

    /// Last estimated position
    pub last_position: Vec3,

    /// Last estimated velocity
    pub last_velocity: Vec3,

    /// Last estimated orientation, (w, x, y, z) order
    pub last_orientation: QuatWxyz,
}

impl Timestamped for IntegratorInputMessage {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_report_frame_timestamp() {
        let pose = PoseMessage {
            timestamp: 2.5,
            position: Vec3f::default(),
            orientation: QuatWxyzF::default(),
        };
        assert_eq!(Timestamped::timestamp(&pose), 2.5);
    }

    #[test]
    fn imu_params_serde_round_trip() {
        let params = ImuParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: ImuParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
