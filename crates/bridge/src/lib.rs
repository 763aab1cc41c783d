//! # Bridge
//!
//! Synchronization core between the two sensor streams and the estimator.
//!
//! Responsibilities:
//! - Feed every inertial sample to the estimator immediately
//! - Withhold buffered camera frames until causally justified by later
//!   inertial data (frame gate)
//! - Convert the estimator state to output conventions
//! - Fan out pose and integrator-input messages, gated on estimator readiness
//!
//! ## Usage
//!
//! ```ignore
//! use bridge::{OutputPublisher, VioBridge};
//!
//! let mut publisher = OutputPublisher::new();
//! publisher.add_pose_sink(pose_handle);
//! publisher.add_integrator_sink(integrator_handle);
//!
//! let mut bridge = VioBridge::new(estimator, frame_queue, publisher, imu_params);
//!
//! // Once per arriving inertial sample, in timestamp order
//! let outcome = bridge.on_imu(Some(sample));
//! ```

mod coordinator;
mod gate;
mod publish;
mod transform;

pub use coordinator::{IngestOutcome, VioBridge};
pub use gate::{FrameGate, GateState};
pub use publish::{OutputPublisher, PublishReport};
pub use transform::transform;

// Re-export contracts types the bridge API surfaces
pub use contracts::{
    EstimatorSnapshot, FrameSource, ImuParams, ImuSample, IntegratorInputMessage, PoseMessage,
    StereoFrame, VioEstimator,
};
