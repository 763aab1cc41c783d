//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Monotonic sensor timestamp (seconds, f64) is the primary clock for both streams
//! - Inertial timestamps are a documented precondition: delivered serialized, non-decreasing

mod error;
mod estimator;
mod math;
mod message;
mod profile;
mod sensor;
mod sink;
mod snapshot;
mod source;

pub use error::*;
pub use estimator::VioEstimator;
pub use math::*;
pub use message::*;
pub use profile::*;
pub use sensor::*;
pub use sink::*;
pub use snapshot::EstimatorSnapshot;
pub use source::{CameraFrameCallback, CameraSource, FrameSource, ImuSampleCallback, ImuSource};
