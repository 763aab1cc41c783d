//! Built-in rig profiles.
//!
//! Calibration constants for the rigs this bridge has been run against. A
//! profile is plain data; custom rigs load the same shape from TOML/JSON
//! instead of patching code.

use contracts::{CameraCalibration, EstimatorTuning, ImuParams, RigProfile, Vec3};

/// Look up a built-in profile by name
pub fn builtin(name: &str) -> Option<RigProfile> {
    match name.to_lowercase().as_str() {
        "euroc" => Some(euroc()),
        "zed" => Some(zed()),
        _ => None,
    }
}

/// EuRoC MAV dataset rig (global-shutter stereo + 200 Hz IMU)
pub fn euroc() -> RigProfile {
    RigProfile {
        name: "euroc".to_string(),
        cameras: [
            CameraCalibration {
                width: 752,
                height: 480,
                intrinsics: [
                    458.654,
                    457.296,
                    367.215,
                    248.375,
                    -0.28340811,
                    0.07395907,
                    0.00019359,
                    1.76187114e-05,
                ],
                fisheye: false,
                t_cam_to_imu: [
                    [0.0148655429818, -0.999880929698, 0.00414029679422, -0.0216401454975],
                    [0.999557249008, 0.0149672133247, 0.025715529948, -0.064676986768],
                    [-0.0257744366974, 0.00375618835797, 0.999660727178, 0.00981073058949],
                    [0.0, 0.0, 0.0, 1.0],
                ],
            },
            CameraCalibration {
                width: 752,
                height: 480,
                intrinsics: [
                    457.587,
                    456.134,
                    379.999,
                    255.238,
                    -0.28368365,
                    0.07451284,
                    -0.00010473,
                    -3.55590700e-05,
                ],
                fisheye: false,
                t_cam_to_imu: [
                    [0.0125552670891, -0.999755099723, 0.0182237714554, -0.0198435579556],
                    [0.999598781151, 0.0130119051815, 0.0251588363115, 0.0453689425024],
                    [-0.0253898008918, 0.0179005838253, 0.999517347078, 0.00786212447038],
                    [0.0, 0.0, 0.0, 1.0],
                ],
            },
        ],
        imu: ImuParams {
            gyro_noise: 0.00016968,
            accel_noise: 0.002,
            gyro_walk: 1.9393e-05,
            accel_walk: 0.003,
            gravity: Vec3::new(0.0, 0.0, -9.81),
            integration_sigma: 1.0,
            nominal_rate_hz: 200.0,
        },
        estimator: EstimatorTuning::default(),
    }
}

/// ZED stereo camera rig (rolling shutter, hand-tuned thresholds)
pub fn zed() -> RigProfile {
    RigProfile {
        name: "zed".to_string(),
        cameras: [
            CameraCalibration {
                width: 672,
                height: 376,
                intrinsics: [349.686, 349.686, 332.778, 192.423, -0.175708, 0.0284421, 0.0, 0.0],
                fisheye: false,
                t_cam_to_imu: [
                    [-0.01080233, 0.00183858, 0.99993996, 0.01220425],
                    [-0.99993288, -0.00420947, -0.01079452, 0.0146056],
                    [0.00418937, -0.99998945, 0.00188393, -0.00113692],
                    [0.0, 0.0, 0.0, 1.0],
                ],
            },
            CameraCalibration {
                width: 672,
                height: 376,
                intrinsics: [350.01, 350.01, 343.729, 185.405, -0.174559, 0.0277521, 0.0, 0.0],
                fisheye: false,
                t_cam_to_imu: [
                    [-0.01043535, -0.00191061, 0.99994372, 0.01190459],
                    [-0.99993668, -0.00419281, -0.01044329, -0.04732387],
                    [0.00421252, -0.99998938, -0.00186674, -0.00098799],
                    [0.0, 0.0, 0.0, 1.0],
                ],
            },
        ],
        imu: ImuParams {
            gyro_noise: 0.00024213,
            accel_noise: 0.00395942,
            gyro_walk: 1.9393e-05,
            accel_walk: 0.00072014,
            gravity: Vec3::new(0.0, 0.0, -9.81),
            integration_sigma: 1.0,
            nominal_rate_hz: 200.0,
        },
        estimator: EstimatorTuning {
            // Rolling shutter tolerates fewer, stronger features
            init_imu_thresh: 0.5,
            num_features: 200,
            ..Default::default()
        },
    }
}
