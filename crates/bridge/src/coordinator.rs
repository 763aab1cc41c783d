//! Ingest coordinator - per-inertial-sample orchestration.

use contracts::{
    FrameSource, ImuParams, ImuSample, VioEstimator, LEFT_CAMERA_ID, RIGHT_CAMERA_ID,
};
use tracing::{debug, instrument, trace, warn};

use crate::gate::{FrameGate, GateState};
use crate::publish::OutputPublisher;
use crate::transform::transform;

/// What one coordinator invocation did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IngestOutcome {
    /// Sentinel sample, the inertial stream has not started
    NotStarted,
    /// Inertial fed, no camera frame buffered
    Waiting,
    /// Inertial fed, pending frame not yet causally justified
    Deferred,
    /// Frame dispatched and both messages published
    Published { frame_timestamp: f64 },
    /// Frame dispatched, estimator still in its warm-up window
    Suppressed { frame_timestamp: f64 },
    /// Frame dispatched, outputs dropped over a non-finite scalar
    Rejected { frame_timestamp: f64 },
}

/// Drives the estimator from the two sensor streams.
///
/// Invoked once per arriving inertial sample by a single logical thread; the
/// coordinator performs no internal synchronization and must not be called
/// concurrently. Inertial timestamps are a documented precondition: callers
/// deliver them serialized in non-decreasing order. A regression is logged and
/// counted but the sample is still fed; gate behavior under out-of-order
/// input is undefined.
///
/// Holds no numeric state of its own beyond the gate slot; the estimator owns
/// all estimation state.
pub struct VioBridge<E, Q> {
    estimator: E,
    frames: Q,
    gate: FrameGate,
    publisher: OutputPublisher,
    imu_params: ImuParams,
    last_inertial_timestamp: Option<f64>,
    dispatch_count: u64,
}

impl<E, Q> VioBridge<E, Q>
where
    E: VioEstimator,
    Q: FrameSource,
{
    /// Create a bridge from its four injected collaborators
    pub fn new(estimator: E, frames: Q, publisher: OutputPublisher, imu_params: ImuParams) -> Self {
        Self {
            estimator,
            frames,
            gate: FrameGate::new(),
            publisher,
            imu_params,
            last_inertial_timestamp: None,
            dispatch_count: 0,
        }
    }

    /// Process one inertial sample.
    ///
    /// `None` is the "stream not yet started" marker and is a no-op. For a
    /// real sample the estimator is fed unconditionally, then the gate is
    /// evaluated; at most one buffered frame is dispatched per invocation.
    #[instrument(name = "bridge_on_imu", level = "trace", skip(self, sample))]
    pub fn on_imu(&mut self, sample: Option<ImuSample>) -> IngestOutcome {
        let Some(sample) = sample else {
            trace!("inertial stream not started yet");
            return IngestOutcome::NotStarted;
        };

        self.note_inertial_order(sample.timestamp);

        self.estimator.feed_inertial(
            sample.timestamp,
            sample.angular_velocity,
            sample.linear_acceleration,
        );
        metrics::counter!("vio_bridge_samples_fed_total").increment(1);

        self.gate.try_acquire(&mut self.frames);

        if !self.gate.is_ready(sample.timestamp) {
            return match self.gate.state() {
                GateState::Empty => IngestOutcome::Waiting,
                GateState::Pending => IngestOutcome::Deferred,
            };
        }

        let Some(frame) = self.gate.take() else {
            // is_ready was just true, so the slot cannot be empty
            return IngestOutcome::Waiting;
        };

        self.dispatch(frame, sample.timestamp)
    }

    /// Frames dispatched to the estimator so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// Current gate state (for diagnostics)
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Borrow the estimator (for readiness probes and stats)
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    fn note_inertial_order(&mut self, timestamp: f64) {
        if let Some(last) = self.last_inertial_timestamp {
            if timestamp < last {
                warn!(
                    timestamp,
                    last, "inertial timestamp regression, gate behavior undefined"
                );
                metrics::counter!("vio_bridge_imu_order_regressions_total").increment(1);
            }
        }
        self.last_inertial_timestamp = Some(timestamp);
    }

    fn dispatch(
        &mut self,
        frame: contracts::StereoFrame,
        inertial_timestamp: f64,
    ) -> IngestOutcome {
        let frame_timestamp = frame.timestamp;

        self.estimator.feed_stereo(
            frame_timestamp,
            &frame.left,
            &frame.right,
            LEFT_CAMERA_ID,
            RIGHT_CAMERA_ID,
        );
        self.dispatch_count += 1;

        metrics::counter!("vio_bridge_frames_dispatched_total").increment(1);
        metrics::histogram!("vio_bridge_gate_wait_seconds")
            .record(inertial_timestamp - frame_timestamp);

        if !self.estimator.initialized() {
            // Expected steady state during warm-up, not an error
            debug!(frame_timestamp, "dispatch without output, estimator warming up");
            metrics::counter!("vio_bridge_publish_suppressed_total").increment(1);
            return IngestOutcome::Suppressed { frame_timestamp };
        }

        let snapshot = self.estimator.snapshot();
        match transform(&snapshot, frame_timestamp, &self.imu_params) {
            Ok((pose, integrator_input)) => {
                self.publisher.publish(pose, integrator_input);
                trace!(frame_timestamp, "pose and integrator input published");
                IngestOutcome::Published { frame_timestamp }
            }
            Err(error) => {
                warn!(frame_timestamp, %error, "estimator produced non-finite state, outputs dropped");
                let field = match &error {
                    contracts::BridgeError::NonFiniteOutput { field } => *field,
                    _ => "unknown",
                };
                metrics::counter!("vio_bridge_nonfinite_rejected_total", "field" => field)
                    .increment(1);
                IngestOutcome::Rejected { frame_timestamp }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::OutputPublisher;
    use contracts::{
        EstimatorSnapshot, IntegratorInputMessage, OutputSink, PoseMessage, QuatXyzw, StereoFrame,
        Vec3,
    };
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Records feed order and lets tests script readiness and snapshots
    struct ScriptedEstimator {
        inertial_feeds: Vec<f64>,
        stereo_feeds: Vec<f64>,
        initialized: bool,
        snapshot: EstimatorSnapshot,
    }

    impl ScriptedEstimator {
        fn new() -> Self {
            Self {
                inertial_feeds: Vec::new(),
                stereo_feeds: Vec::new(),
                initialized: true,
                snapshot: EstimatorSnapshot {
                    position: Vec3::new(1.0, 2.0, 3.0),
                    orientation: QuatXyzw::new(0.0, 0.0, 0.0, 1.0),
                    ..Default::default()
                },
            }
        }
    }

    impl VioEstimator for &mut ScriptedEstimator {
        fn feed_inertial(&mut self, timestamp: f64, _w: Vec3, _a: Vec3) {
            self.inertial_feeds.push(timestamp);
        }

        fn feed_stereo(
            &mut self,
            timestamp: f64,
            _left: &bytes::Bytes,
            _right: &bytes::Bytes,
            left_id: usize,
            right_id: usize,
        ) {
            assert_eq!((left_id, right_id), (LEFT_CAMERA_ID, RIGHT_CAMERA_ID));
            self.stereo_feeds.push(timestamp);
        }

        fn snapshot(&self) -> EstimatorSnapshot {
            self.snapshot
        }

        fn initialized(&self) -> bool {
            self.initialized
        }
    }

    struct QueueStub {
        frames: VecDeque<StereoFrame>,
    }

    impl FrameSource for QueueStub {
        fn try_next(&mut self) -> Option<StereoFrame> {
            self.frames.pop_front()
        }

        fn len(&self) -> usize {
            self.frames.len()
        }
    }

    struct CountingSink<M> {
        published: Arc<Mutex<Vec<M>>>,
    }

    impl<M: Send> OutputSink<M> for CountingSink<M> {
        fn name(&self) -> &str {
            "counting"
        }

        fn try_publish(&mut self, message: M) -> bool {
            self.published.lock().unwrap().push(message);
            true
        }
    }

    struct Harness {
        poses: Arc<Mutex<Vec<PoseMessage>>>,
        integrator_inputs: Arc<Mutex<Vec<IntegratorInputMessage>>>,
    }

    impl Harness {
        fn build<'a>(
            estimator: &'a mut ScriptedEstimator,
            frame_timestamps: &[f64],
        ) -> (Self, VioBridge<&'a mut ScriptedEstimator, QueueStub>) {
            let poses = Arc::new(Mutex::new(Vec::new()));
            let integrator_inputs = Arc::new(Mutex::new(Vec::new()));

            let mut publisher = OutputPublisher::new();
            publisher.add_pose_sink(Box::new(CountingSink {
                published: poses.clone(),
            }));
            publisher.add_integrator_sink(Box::new(CountingSink {
                published: integrator_inputs.clone(),
            }));

            let queue = QueueStub {
                frames: frame_timestamps
                    .iter()
                    .map(|&t| StereoFrame::new(t, vec![1u8; 8], vec![2u8; 8]))
                    .collect(),
            };

            let bridge = VioBridge::new(estimator, queue, publisher, ImuParams::default());
            (
                Self {
                    poses,
                    integrator_inputs,
                },
                bridge,
            )
        }
    }

    fn imu(t: f64) -> Option<ImuSample> {
        Some(ImuSample {
            timestamp: t,
            angular_velocity: Vec3::new(0.0, 0.0, 0.1),
            linear_acceleration: Vec3::new(0.0, 0.0, 9.81),
        })
    }

    #[test]
    fn sentinel_sample_is_a_noop() {
        let mut est = ScriptedEstimator::new();
        let (_h, mut bridge) = Harness::build(&mut est, &[]);

        assert_eq!(bridge.on_imu(None), IngestOutcome::NotStarted);
        assert!(est.inertial_feeds.is_empty());
    }

    #[test]
    fn inertial_is_fed_even_without_frames() {
        let mut est = ScriptedEstimator::new();
        {
            let (_h, mut bridge) = Harness::build(&mut est, &[]);
            assert_eq!(bridge.on_imu(imu(0.0)), IngestOutcome::Waiting);
            assert_eq!(bridge.on_imu(imu(0.01)), IngestOutcome::Waiting);
        }
        assert_eq!(est.inertial_feeds, vec![0.0, 0.01]);
        assert!(est.stereo_feeds.is_empty());
    }

    #[test]
    fn scenario_gate_holds_until_bracketing_sample() {
        let mut est = ScriptedEstimator::new();
        let (h, mut bridge) = Harness::build(&mut est, &[1.0]);

        // Frame at t=1 buffered, inertial at t=0.5 arrives: still pending
        assert_eq!(bridge.on_imu(imu(0.5)), IngestOutcome::Deferred);
        assert_eq!(bridge.gate_state(), GateState::Pending);

        // Equal timestamps do not release the frame
        assert_eq!(bridge.on_imu(imu(1.0)), IngestOutcome::Deferred);

        // First strictly later sample dispatches and publishes exactly once
        assert_eq!(
            bridge.on_imu(imu(2.0)),
            IngestOutcome::Published {
                frame_timestamp: 1.0
            }
        );
        assert_eq!(bridge.gate_state(), GateState::Empty);

        let poses = h.poses.lock().unwrap();
        let integs = h.integrator_inputs.lock().unwrap();
        assert_eq!(poses.len(), 1);
        assert_eq!(integs.len(), 1);
        // Messages carry the frame's timestamp, not the inertial sample's
        assert_eq!(poses[0].timestamp, 1.0);
        assert_eq!(integs[0].timestamp, 1.0);
    }

    #[test]
    fn inertial_precedes_stereo_for_the_dispatching_sample() {
        let mut est = ScriptedEstimator::new();
        {
            let (_h, mut bridge) = Harness::build(&mut est, &[0.5]);
            bridge.on_imu(imu(1.0));
        }
        // The t=1.0 inertial feed lands before the t=0.5 stereo feed
        assert_eq!(est.inertial_feeds, vec![1.0]);
        assert_eq!(est.stereo_feeds, vec![0.5]);
    }

    #[test]
    fn frames_dispatch_in_enqueue_order_one_per_sample() {
        let mut est = ScriptedEstimator::new();
        {
            let (_h, mut bridge) = Harness::build(&mut est, &[0.1, 0.2, 0.3]);
            assert_eq!(
                bridge.on_imu(imu(1.0)),
                IngestOutcome::Published {
                    frame_timestamp: 0.1
                }
            );
            // One frame per invocation even when several are eligible
            assert_eq!(
                bridge.on_imu(imu(1.1)),
                IngestOutcome::Published {
                    frame_timestamp: 0.2
                }
            );
            assert_eq!(
                bridge.on_imu(imu(1.2)),
                IngestOutcome::Published {
                    frame_timestamp: 0.3
                }
            );
            assert_eq!(bridge.dispatch_count(), 3);
        }
        assert_eq!(est.stereo_feeds, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn uninitialized_estimator_suppresses_output_but_consumes_frame() {
        let mut est = ScriptedEstimator::new();
        est.initialized = false;
        let (h, mut bridge) = Harness::build(&mut est, &[1.0]);

        assert_eq!(
            bridge.on_imu(imu(2.0)),
            IngestOutcome::Suppressed {
                frame_timestamp: 1.0
            }
        );
        assert!(h.poses.lock().unwrap().is_empty());
        assert!(h.integrator_inputs.lock().unwrap().is_empty());
        // Frame was still attempted exactly once
        assert_eq!(bridge.dispatch_count(), 1);
        assert_eq!(bridge.gate_state(), GateState::Empty);
    }

    #[test]
    fn non_finite_snapshot_drops_outputs_without_panicking() {
        let mut est = ScriptedEstimator::new();
        est.snapshot.position.x = f64::NAN;
        let (h, mut bridge) = Harness::build(&mut est, &[1.0]);

        assert_eq!(
            bridge.on_imu(imu(2.0)),
            IngestOutcome::Rejected {
                frame_timestamp: 1.0
            }
        );
        assert!(h.poses.lock().unwrap().is_empty());
        assert!(h.integrator_inputs.lock().unwrap().is_empty());
    }

    #[test]
    fn single_dispatch_per_frame_across_outcomes() {
        // Whatever the initialization outcome, a frame reaches feed_stereo once
        let mut est = ScriptedEstimator::new();
        est.initialized = false;
        {
            let (_h, mut bridge) = Harness::build(&mut est, &[1.0]);
            bridge.on_imu(imu(2.0));
            bridge.on_imu(imu(3.0));
            bridge.on_imu(imu(4.0));
        }
        assert_eq!(est.stereo_feeds, vec![1.0]);
    }
}
