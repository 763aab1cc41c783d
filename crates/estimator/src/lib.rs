//! # Estimator
//!
//! `VioEstimator` implementations usable without the real estimation engine.
//!
//! The production engine is an external black box consumed through the
//! `contracts::VioEstimator` trait; this crate provides a deterministic mock
//! with the same observable behavior (warm-up window, snapshot after stereo
//! updates, fault injection) for development and testing.

mod mock;

pub use mock::{MockEstimator, MockEstimatorConfig};

pub use contracts::VioEstimator;
