//! RigProfile - device calibration as a configuration value
//!
//! Different physical rigs (camera intrinsics/extrinsics, IMU noise figures,
//! estimator tuning) are alternative profile values selected at construction
//! time, not alternative code paths. One build serves every rig.

use serde::{Deserialize, Serialize};

use crate::{ImuParams, QuatXyzw, Vec3};

/// Complete calibration and tuning profile for one stereo/IMU rig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigProfile {
    /// Profile name (e.g., "euroc")
    pub name: String,

    /// Per-camera calibration, index 0 = left, 1 = right
    pub cameras: [CameraCalibration; 2],

    /// IMU noise model published with every integrator input
    pub imu: ImuParams,

    /// Estimator tuning knobs, carried as data and handed to the engine
    #[serde(default)]
    pub estimator: EstimatorTuning,
}

/// Calibration of a single camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// fx, fy, cx, cy, k1, k2, p1, p2
    pub intrinsics: [f64; 8],

    /// Whether the distortion model is fisheye
    #[serde(default)]
    pub fisheye: bool,

    /// Homogeneous camera-to-IMU transform, row major
    pub t_cam_to_imu: [[f64; 4]; 4],
}

/// Extrinsics in the form the estimator consumes: rotation of the IMU frame
/// expressed in the camera frame plus the IMU position in the camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedExtrinsics {
    /// Rotation, estimator component order
    pub rotation: QuatXyzw,

    /// Translation (meters)
    pub translation: Vec3,
}

/// Estimator tuning parameters
///
/// Opaque to the bridge core; forwarded to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorTuning {
    /// Initialization window length (seconds)
    pub init_window_time: f64,

    /// IMU excitation threshold to leave the initialization window
    pub init_imu_thresh: f64,

    /// Number of tracked feature points
    pub num_features: u32,

    /// FAST corner detector threshold
    pub fast_threshold: u32,

    /// Feature extraction grid columns
    pub grid_x: u32,

    /// Feature extraction grid rows
    pub grid_y: u32,

    /// Descriptor matching ratio test
    pub knn_ratio: f64,

    /// Delay before SLAM features enter the state (seconds)
    pub dt_slam_delay: f64,

    /// Upper bound on SLAM features in the state
    pub max_slam_features: u32,

    /// Track features across both eyes
    pub use_stereo: bool,

    /// Co-estimate camera extrinsics online
    pub calibrate_extrinsics: bool,

    /// Co-estimate camera intrinsics online
    pub calibrate_intrinsics: bool,

    /// Co-estimate the camera-to-IMU time offset online
    pub calibrate_time_offset: bool,
}

impl Default for EstimatorTuning {
    fn default() -> Self {
        Self {
            init_window_time: 0.75,
            init_imu_thresh: 1.5,
            num_features: 150,
            fast_threshold: 15,
            grid_x: 5,
            grid_y: 3,
            knn_ratio: 0.7,
            dt_slam_delay: 3.0,
            max_slam_features: 50,
            use_stereo: true,
            calibrate_extrinsics: true,
            calibrate_intrinsics: true,
            calibrate_time_offset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_defaults_round_trip() {
        let tuning = EstimatorTuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: EstimatorTuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuning);
    }
}
