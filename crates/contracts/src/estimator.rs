//! VioEstimator trait - black-box estimation engine abstraction.

use bytes::Bytes;

use crate::{EstimatorSnapshot, Vec3};

/// Visual-inertial estimator driven by the bridge.
///
/// The engine itself (feature tracking, filtering, state representation) is an
/// external collaborator; this trait is the exact surface the bridge consumes.
///
/// # Contract
///
/// - Never errors for valid calls. A failed initialization is observable only
///   through [`initialized`](VioEstimator::initialized) returning false.
/// - [`snapshot`](VioEstimator::snapshot) is valid to call at any time; the
///   values are meaningful only once `initialized()` is true.
/// - The caller guarantees inertial feeds arrive serialized in non-decreasing
///   timestamp order, and that every stereo feed is bracketed by a later
///   inertial feed.
pub trait VioEstimator: Send {
    /// Feed one inertial measurement
    fn feed_inertial(&mut self, timestamp: f64, angular_velocity: Vec3, linear_acceleration: Vec3);

    /// Feed one stereo frame
    ///
    /// `left_id` / `right_id` select the calibrated camera slots.
    fn feed_stereo(
        &mut self,
        timestamp: f64,
        left: &Bytes,
        right: &Bytes,
        left_id: usize,
        right_id: usize,
    );

    /// Read the current state
    fn snapshot(&self) -> EstimatorSnapshot;

    /// Whether the estimator has completed its initialization window
    fn initialized(&self) -> bool;
}
