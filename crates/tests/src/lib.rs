//! # Integration Tests
//!
//! End-to-end tests across crate boundaries.
//!
//! Covered here:
//! - Gate scenario from ingestion queue to published messages
//! - Publish-iff-initialized across the real publisher workers
//! - Non-finite estimator state suppressing output end to end
//! - Profile loading feeding the bridge configuration

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::QuatXyzw::identity();
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};

    use bridge::{GateState, IngestOutcome, OutputPublisher, VioBridge};
    use contracts::{
        BridgeError, FrameSource, ImuSample, IntegratorInputMessage, MessageSink, PoseMessage,
        StereoFrame, Timestamped, Vec3,
    };
    use estimator::{MockEstimator, MockEstimatorConfig};
    use ingestion::SharedFrameQueue;
    use publisher::SinkHandle;

    fn imu(t: f64) -> Option<ImuSample> {
        Some(ImuSample {
            timestamp: t,
            angular_velocity: Vec3::new(0.0, 0.0, 0.2),
            linear_acceleration: Vec3::new(0.1, 0.0, -9.81),
        })
    }

    fn frame(t: f64) -> StereoFrame {
        StereoFrame::new(t, vec![0x40u8; 64], vec![0x80u8; 64])
    }

    /// Collecting async sink used behind a real worker task
    struct CollectingSink<M> {
        name: String,
        seen: Arc<Mutex<Vec<M>>>,
    }

    impl<M: Timestamped + Clone + Send + Sync> MessageSink<M> for CollectingSink<M> {
        fn name(&self) -> &str {
            &self.name
        }

        async fn write(&mut self, message: &M) -> Result<(), BridgeError> {
            self.seen.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), BridgeError> {
            Ok(())
        }
    }

    struct Pipeline {
        queue: SharedFrameQueue,
        bridge: VioBridge<MockEstimator, SharedFrameQueue>,
        pose_handle: SinkHandle<PoseMessage>,
        integrator_handle: SinkHandle<IntegratorInputMessage>,
        poses: Arc<Mutex<Vec<PoseMessage>>>,
        integrator_inputs: Arc<Mutex<Vec<IntegratorInputMessage>>>,
    }

    /// Wire the real components together: shared queue, bridge core, worker
    /// sinks. `init_after_stereo = 0` makes the estimator initialized from
    /// the first dispatch.
    fn build_pipeline(estimator_config: MockEstimatorConfig) -> Pipeline {
        let poses = Arc::new(Mutex::new(Vec::new()));
        let integrator_inputs = Arc::new(Mutex::new(Vec::new()));

        let pose_handle = SinkHandle::spawn(
            CollectingSink {
                name: "pose_collect".to_string(),
                seen: poses.clone(),
            },
            16,
        );
        let integrator_handle = SinkHandle::spawn(
            CollectingSink {
                name: "integrator_collect".to_string(),
                seen: integrator_inputs.clone(),
            },
            16,
        );

        let mut output = OutputPublisher::new();
        output.add_pose_sink(Box::new(pose_handle.port()));
        output.add_integrator_sink(Box::new(integrator_handle.port()));

        let queue = SharedFrameQueue::with_capacity(8);
        let bridge = VioBridge::new(
            MockEstimator::new(estimator_config),
            queue.clone(),
            output,
            calibration::euroc().imu,
        );

        Pipeline {
            queue,
            bridge,
            pose_handle,
            integrator_handle,
            poses,
            integrator_inputs,
        }
    }

    async fn shutdown(pipeline: Pipeline) -> (Vec<PoseMessage>, Vec<IntegratorInputMessage>) {
        drop(pipeline.bridge); // releases the publisher's ports
        pipeline.pose_handle.shutdown().await;
        pipeline.integrator_handle.shutdown().await;
        let poses = pipeline.poses.lock().unwrap().clone();
        let integs = pipeline.integrator_inputs.lock().unwrap().clone();
        (poses, integs)
    }

    /// The ordering scenario: no frame, then a buffered frame held through an
    /// earlier inertial sample, released by the first strictly later one.
    #[tokio::test]
    async fn test_gate_scenario_end_to_end() {
        let mut pipeline = build_pipeline(MockEstimatorConfig {
            init_after_stereo: 0,
            ..Default::default()
        });

        // Inertial at t=0, nothing queued
        assert_eq!(pipeline.bridge.on_imu(imu(0.0)), IngestOutcome::Waiting);
        assert_eq!(pipeline.bridge.gate_state(), GateState::Empty);

        // Frame enqueued at t=1, inertial at t=0.5: still pending
        pipeline.queue.push(frame(1.0));
        assert_eq!(pipeline.bridge.on_imu(imu(0.5)), IngestOutcome::Deferred);
        assert_eq!(pipeline.bridge.gate_state(), GateState::Pending);

        // Inertial at t=2 dispatches the frame
        assert_eq!(
            pipeline.bridge.on_imu(imu(2.0)),
            IngestOutcome::Published {
                frame_timestamp: 1.0
            }
        );

        let (poses, integs) = shutdown(pipeline).await;
        assert_eq!(poses.len(), 1);
        assert_eq!(integs.len(), 1);
        assert_eq!(poses[0].timestamp, 1.0);
        assert_eq!(integs[0].timestamp, 1.0);
    }

    #[tokio::test]
    async fn test_publish_iff_initialized() {
        let mut pipeline = build_pipeline(MockEstimatorConfig {
            init_after_stereo: 2,
            ..Default::default()
        });

        // First dispatch happens during warm-up: suppressed
        pipeline.queue.push(frame(0.1));
        assert!(matches!(
            pipeline.bridge.on_imu(imu(0.2)),
            IngestOutcome::Suppressed { .. }
        ));

        // Second dispatch crosses the warm-up threshold: published
        pipeline.queue.push(frame(0.3));
        assert!(matches!(
            pipeline.bridge.on_imu(imu(0.4)),
            IngestOutcome::Published { .. }
        ));

        assert_eq!(pipeline.bridge.dispatch_count(), 2);
        assert_eq!(pipeline.bridge.estimator().stereo_count(), 2);

        let (poses, integs) = shutdown(pipeline).await;
        // Exactly one pair despite two dispatches
        assert_eq!(poses.len(), 1);
        assert_eq!(integs.len(), 1);
        assert_eq!(poses[0].timestamp, 0.3);
    }

    #[tokio::test]
    async fn test_non_finite_state_suppresses_output() {
        let mut pipeline = build_pipeline(MockEstimatorConfig {
            init_after_stereo: 0,
            nan_after_stereo: Some(2),
            ..Default::default()
        });

        pipeline.queue.push(frame(0.1));
        assert!(matches!(
            pipeline.bridge.on_imu(imu(0.2)),
            IngestOutcome::Published { .. }
        ));

        // The estimator state goes non-finite; the dispatch is rejected, not
        // published, and nothing panics
        pipeline.queue.push(frame(0.3));
        assert!(matches!(
            pipeline.bridge.on_imu(imu(0.4)),
            IngestOutcome::Rejected { .. }
        ));

        let (poses, integs) = shutdown(pipeline).await;
        assert_eq!(poses.len(), 1);
        assert_eq!(integs.len(), 1);
    }

    #[tokio::test]
    async fn test_backpressure_holds_queue_while_pending() {
        let mut pipeline = build_pipeline(MockEstimatorConfig {
            init_after_stereo: 0,
            ..Default::default()
        });

        // Three frames queued, all ahead of the inertial clock
        for t in [10.0, 11.0, 12.0] {
            pipeline.queue.push(frame(t));
        }

        // The gate holds one frame; the other two stay in the queue
        assert_eq!(pipeline.bridge.on_imu(imu(1.0)), IngestOutcome::Deferred);
        assert_eq!(FrameSource::len(&pipeline.queue), 2);
        assert_eq!(pipeline.bridge.on_imu(imu(2.0)), IngestOutcome::Deferred);
        assert_eq!(FrameSource::len(&pipeline.queue), 2);

        // Release them one inertial sample at a time, in enqueue order
        for (inertial_t, expected_frame_t) in [(10.5, 10.0), (11.5, 11.0), (12.5, 12.0)] {
            assert_eq!(
                pipeline.bridge.on_imu(imu(inertial_t)),
                IngestOutcome::Published {
                    frame_timestamp: expected_frame_t
                }
            );
        }

        let (poses, _) = shutdown(pipeline).await;
        assert_eq!(poses.len(), 3);
    }

    #[tokio::test]
    async fn test_sentinels_do_not_touch_the_estimator() {
        let mut pipeline = build_pipeline(MockEstimatorConfig::default());

        for _ in 0..5 {
            assert_eq!(pipeline.bridge.on_imu(None), IngestOutcome::NotStarted);
        }
        assert_eq!(pipeline.bridge.estimator().inertial_count(), 0);

        pipeline.bridge.on_imu(imu(0.1));
        assert_eq!(pipeline.bridge.estimator().inertial_count(), 1);

        let (poses, _) = shutdown(pipeline).await;
        assert!(poses.is_empty());
    }

    #[tokio::test]
    async fn test_integrator_input_carries_profile_noise_model() {
        let mut pipeline = build_pipeline(MockEstimatorConfig {
            init_after_stereo: 0,
            ..Default::default()
        });

        pipeline.queue.push(frame(0.5));
        pipeline.bridge.on_imu(imu(1.0));

        let (_, integs) = shutdown(pipeline).await;
        let expected = calibration::euroc().imu;
        assert_eq!(integs.len(), 1);
        assert_eq!(integs[0].imu_params, expected);
        // Orientation arrives in w-first order and finite
        assert!(integs[0].last_orientation.is_finite());
    }
}
