//! Profile validation
//!
//! Rules:
//! - image dimensions and intrinsics are positive/finite
//! - t_cam_to_imu is finite with a homogeneous bottom row
//! - IMU noise densities and rates are positive and finite
//! - estimator tuning thresholds are in range

use contracts::{BridgeError, CameraCalibration, RigProfile};

/// Validate a rig profile
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(profile: &RigProfile) -> Result<(), BridgeError> {
    if profile.name.trim().is_empty() {
        return Err(BridgeError::profile_validation("name", "must not be empty"));
    }

    for (index, camera) in profile.cameras.iter().enumerate() {
        validate_camera(index, camera)?;
    }
    validate_imu(profile)?;
    validate_tuning(profile)?;
    Ok(())
}

fn validate_camera(index: usize, camera: &CameraCalibration) -> Result<(), BridgeError> {
    let field = |name: &str| format!("cameras[{index}].{name}");

    if camera.width == 0 || camera.height == 0 {
        return Err(BridgeError::profile_validation(
            field("width/height"),
            "image dimensions must be > 0",
        ));
    }

    // fx, fy must be positive; the remaining intrinsics only need to be finite
    let [fx, fy, ..] = camera.intrinsics;
    if fx <= 0.0 || fy <= 0.0 {
        return Err(BridgeError::profile_validation(
            field("intrinsics"),
            format!("focal lengths must be > 0, got fx={fx}, fy={fy}"),
        ));
    }
    if camera.intrinsics.iter().any(|v| !v.is_finite()) {
        return Err(BridgeError::profile_validation(
            field("intrinsics"),
            "intrinsics must be finite",
        ));
    }

    for row in &camera.t_cam_to_imu {
        if row.iter().any(|v| !v.is_finite()) {
            return Err(BridgeError::profile_validation(
                field("t_cam_to_imu"),
                "transform must be finite",
            ));
        }
    }
    let bottom = camera.t_cam_to_imu[3];
    if bottom != [0.0, 0.0, 0.0, 1.0] {
        return Err(BridgeError::profile_validation(
            field("t_cam_to_imu"),
            format!("bottom row must be [0, 0, 0, 1], got {bottom:?}"),
        ));
    }

    Ok(())
}

fn validate_imu(profile: &RigProfile) -> Result<(), BridgeError> {
    let imu = &profile.imu;

    let densities = [
        ("imu.gyro_noise", imu.gyro_noise),
        ("imu.accel_noise", imu.accel_noise),
        ("imu.gyro_walk", imu.gyro_walk),
        ("imu.accel_walk", imu.accel_walk),
    ];
    for (name, value) in densities {
        if !(value.is_finite() && value > 0.0) {
            return Err(BridgeError::profile_validation(
                name,
                format!("must be > 0 and finite, got {value}"),
            ));
        }
    }

    if !(imu.nominal_rate_hz.is_finite() && imu.nominal_rate_hz > 0.0) {
        return Err(BridgeError::profile_validation(
            "imu.nominal_rate_hz",
            format!("must be > 0, got {}", imu.nominal_rate_hz),
        ));
    }

    if !imu.gravity.is_finite() {
        return Err(BridgeError::profile_validation(
            "imu.gravity",
            "must be finite",
        ));
    }

    Ok(())
}

fn validate_tuning(profile: &RigProfile) -> Result<(), BridgeError> {
    let tuning = &profile.estimator;

    if tuning.init_window_time <= 0.0 {
        return Err(BridgeError::profile_validation(
            "estimator.init_window_time",
            format!("must be > 0, got {}", tuning.init_window_time),
        ));
    }
    if tuning.init_imu_thresh <= 0.0 {
        return Err(BridgeError::profile_validation(
            "estimator.init_imu_thresh",
            format!("must be > 0, got {}", tuning.init_imu_thresh),
        ));
    }
    if tuning.num_features == 0 {
        return Err(BridgeError::profile_validation(
            "estimator.num_features",
            "must be > 0",
        ));
    }
    if tuning.grid_x == 0 || tuning.grid_y == 0 {
        return Err(BridgeError::profile_validation(
            "estimator.grid_x/grid_y",
            "extraction grid must be at least 1x1",
        ));
    }
    if !(0.0..=1.0).contains(&tuning.knn_ratio) {
        return Err(BridgeError::profile_validation(
            "estimator.knn_ratio",
            format!("must be within [0, 1], got {}", tuning.knn_ratio),
        ));
    }

    Ok(())
}
