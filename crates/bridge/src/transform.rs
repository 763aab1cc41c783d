//! Coordinate transform - estimator state to output conventions.
//!
//! Pure and stateless: position passes through component-wise, orientation is
//! reordered from the estimator's (x, y, z, w) layout to the consumer's
//! (w, x, y, z) layout, and every snapshot-derived scalar is checked finite
//! before either message is built. A non-finite scalar means the estimator
//! violated an invariant upstream; the dispatch's outputs are rejected
//! instead of published.

use contracts::{
    BridgeError, EstimatorSnapshot, ImuParams, IntegratorInputMessage, PoseMessage, QuatXyzw, Vec3,
};

/// Build both output messages from a snapshot.
///
/// `frame_timestamp` is the dispatched frame's timestamp; both messages carry
/// it, not the timestamp of the inertial sample that opened the gate.
///
/// # Errors
/// [`BridgeError::NonFiniteOutput`] naming the first offending field.
pub fn transform(
    snapshot: &EstimatorSnapshot,
    frame_timestamp: f64,
    imu_params: &ImuParams,
) -> Result<(PoseMessage, IntegratorInputMessage), BridgeError> {
    let position = checked_vec(snapshot.position, "position")?;
    let velocity = checked_vec(snapshot.velocity, "velocity")?;
    let accel_bias = checked_vec(snapshot.accel_bias, "accel_bias")?;
    let gyro_bias = checked_vec(snapshot.gyro_bias, "gyro_bias")?;
    let orientation = checked_quat(snapshot.orientation, "orientation")?;
    let time_offset = checked_scalar(snapshot.cam_imu_time_offset, "time_offset")?;

    let orientation_wxyz = orientation.reorder();

    let pose = PoseMessage {
        timestamp: frame_timestamp,
        position: position.to_f32(),
        orientation: orientation_wxyz.to_f32(),
    };

    let integrator_input = IntegratorInputMessage {
        timestamp: frame_timestamp,
        time_offset,
        imu_params: *imu_params,
        accel_bias,
        gyro_bias,
        last_position: position,
        last_velocity: velocity,
        last_orientation: orientation_wxyz,
    };

    Ok((pose, integrator_input))
}

fn checked_vec(value: Vec3, field: &'static str) -> Result<Vec3, BridgeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BridgeError::NonFiniteOutput { field })
    }
}

fn checked_quat(value: QuatXyzw, field: &'static str) -> Result<QuatXyzw, BridgeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BridgeError::NonFiniteOutput { field })
    }
}

fn checked_scalar(value: f64, field: &'static str) -> Result<f64, BridgeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BridgeError::NonFiniteOutput { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> EstimatorSnapshot {
        EstimatorSnapshot {
            position: Vec3::new(1.25, -2.5, 0.75),
            velocity: Vec3::new(0.1, 0.2, -0.3),
            orientation: QuatXyzw::new(0.1, 0.2, 0.3, 0.9),
            accel_bias: Vec3::new(0.01, -0.02, 0.03),
            gyro_bias: Vec3::new(-0.001, 0.002, 0.003),
            cam_imu_time_offset: -0.004,
        }
    }

    #[test]
    fn position_passes_through() {
        let snapshot = sample_snapshot();
        let (pose, integ) = transform(&snapshot, 3.0, &ImuParams::default()).unwrap();

        assert_eq!(integ.last_position, snapshot.position);
        assert_eq!(pose.position.x, snapshot.position.x as f32);
        assert_eq!(pose.position.y, snapshot.position.y as f32);
        assert_eq!(pose.position.z, snapshot.position.z as f32);
    }

    #[test]
    fn orientation_is_reordered_not_rotated() {
        let snapshot = sample_snapshot();
        let (pose, integ) = transform(&snapshot, 3.0, &ImuParams::default()).unwrap();

        assert_eq!(integ.last_orientation.w, snapshot.orientation.w);
        assert_eq!(integ.last_orientation.x, snapshot.orientation.x);
        assert_eq!(integ.last_orientation.y, snapshot.orientation.y);
        assert_eq!(integ.last_orientation.z, snapshot.orientation.z);

        // Round trip back to estimator order
        assert_eq!(integ.last_orientation.reorder(), snapshot.orientation);

        assert_eq!(pose.orientation.w, snapshot.orientation.w as f32);
        assert_eq!(pose.orientation.x, snapshot.orientation.x as f32);
    }

    #[test]
    fn both_messages_carry_the_frame_timestamp() {
        let (pose, integ) = transform(&sample_snapshot(), 7.25, &ImuParams::default()).unwrap();
        assert_eq!(pose.timestamp, 7.25);
        assert_eq!(integ.timestamp, 7.25);
    }

    #[test]
    fn signed_time_offset_is_preserved() {
        let (_, integ) = transform(&sample_snapshot(), 1.0, &ImuParams::default()).unwrap();
        assert_eq!(integ.time_offset, -0.004);
    }

    #[test]
    fn non_finite_fields_are_rejected_by_name() {
        let cases: [(&str, fn(&mut EstimatorSnapshot)); 6] = [
            ("position", |s| s.position.x = f64::NAN),
            ("velocity", |s| s.velocity.z = f64::INFINITY),
            ("orientation", |s| s.orientation.w = f64::NAN),
            ("accel_bias", |s| s.accel_bias.y = f64::NEG_INFINITY),
            ("gyro_bias", |s| s.gyro_bias.x = f64::NAN),
            ("time_offset", |s| s.cam_imu_time_offset = f64::NAN),
        ];

        for (expected_field, poison) in cases {
            let mut snapshot = sample_snapshot();
            poison(&mut snapshot);
            let err = transform(&snapshot, 1.0, &ImuParams::default()).unwrap_err();
            match err {
                BridgeError::NonFiniteOutput { field } => assert_eq!(field, expected_field),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
