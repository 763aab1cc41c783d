//! Camera extrinsics resolution.
//!
//! Profiles store each camera as a homogeneous camera-to-IMU transform; the
//! estimator wants the rotation of the IMU frame expressed in the camera
//! frame plus the IMU position in the camera frame. The conversion is
//! `q(Rᵀ)` and `−Rᵀ·t`.

use contracts::{CameraCalibration, QuatXyzw, ResolvedExtrinsics, RigProfile, Vec3};
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// Resolve one camera's transform into the estimator's extrinsics form
pub fn resolve_extrinsics(t_cam_to_imu: &[[f64; 4]; 4]) -> ResolvedExtrinsics {
    let m = t_cam_to_imu;
    let rotation = Matrix3::new(
        m[0][0], m[0][1], m[0][2], //
        m[1][0], m[1][1], m[1][2], //
        m[2][0], m[2][1], m[2][2],
    );
    let translation = Vector3::new(m[0][3], m[1][3], m[2][3]);

    let r_inv = rotation.transpose();
    let quat = UnitQuaternion::from_matrix(&r_inv);
    let t_inv = -r_inv * translation;

    ResolvedExtrinsics {
        rotation: QuatXyzw::new(quat.i, quat.j, quat.k, quat.w),
        translation: Vec3::new(t_inv.x, t_inv.y, t_inv.z),
    }
}

/// Resolve both cameras of a profile
pub fn resolve_profile(profile: &RigProfile) -> [ResolvedExtrinsics; 2] {
    [
        resolve_camera(&profile.cameras[0]),
        resolve_camera(&profile.cameras[1]),
    ]
}

fn resolve_camera(camera: &CameraCalibration) -> ResolvedExtrinsics {
    resolve_extrinsics(&camera.t_cam_to_imu)
}
