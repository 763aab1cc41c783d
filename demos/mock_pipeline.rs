//! Minimal runnable pipeline: mock sensors through the bridge to log sinks.
//!
//! Run with:
//! ```sh
//! cargo run -p mock_pipeline
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use bridge::{IngestOutcome, OutputPublisher, VioBridge};
use contracts::{IntegratorInputMessage, PoseMessage, SinkConfig, SinkType};
use estimator::{MockEstimator, MockEstimatorConfig};
use ingestion::{
    CameraPipeline, ImuPipeline, MockCameraSource, MockCameraSourceConfig, MockImuSource,
    MockImuSourceConfig, SharedFrameQueue,
};
use observability::BridgeStatsAggregator;
use publisher::create_sink_handle;
use tracing::info;

const TARGET_DISPATCHES: u64 = 40;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let profile = calibration::euroc();
    info!(rig = %profile.name, "starting mock pipeline");

    // Sinks: one log sink per output message
    let log_config = |name: &str| SinkConfig {
        name: name.to_string(),
        sink_type: SinkType::Log,
        queue_capacity: 64,
        params: Default::default(),
    };
    let pose_handle = create_sink_handle::<PoseMessage>(&log_config("pose_log")).await?;
    let integrator_handle =
        create_sink_handle::<IntegratorInputMessage>(&log_config("integrator_log")).await?;

    let mut output = OutputPublisher::new();
    output.add_pose_sink(Box::new(pose_handle.port()));
    output.add_integrator_sink(Box::new(integrator_handle.port()));

    // Ingestion: 200 Hz mock IMU, 20 Hz mock stereo camera
    let queue = SharedFrameQueue::with_capacity(8);
    let mut camera = CameraPipeline::new(queue.clone());
    camera.attach(Box::new(MockCameraSource::new(
        "cam0",
        MockCameraSourceConfig {
            frequency_hz: 20.0,
            image_bytes: 32 * 1024,
        },
    )));

    let mut imu = ImuPipeline::new(256);
    imu.attach(Box::new(MockImuSource::new(
        "imu0",
        MockImuSourceConfig {
            frequency_hz: 200.0,
            leading_sentinels: 3,
            ..Default::default()
        },
    )));
    let samples = imu.take_receiver().context("receiver already taken")?;

    // Bridge core with a mock estimator that warms up over 3 frames
    let mut vio = VioBridge::new(
        MockEstimator::new(MockEstimatorConfig::default()),
        queue,
        output,
        profile.imu,
    );

    camera.start();
    imu.start();

    let mut stats = BridgeStatsAggregator::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(30);

    loop {
        let sample = tokio::select! {
            received = samples.recv() => match received {
                Ok(sample) => sample,
                Err(_) => break,
            },
            _ = tokio::time::sleep_until(deadline) => break,
        };

        let inertial_t = sample.as_ref().map(|s| s.timestamp).unwrap_or_default();
        match vio.on_imu(sample) {
            IngestOutcome::NotStarted => stats.record_sentinel(),
            IngestOutcome::Waiting => stats.record_waiting(),
            IngestOutcome::Deferred => stats.record_deferred(),
            IngestOutcome::Published { frame_timestamp } => {
                stats.record_published(inertial_t - frame_timestamp)
            }
            IngestOutcome::Suppressed { frame_timestamp } => {
                stats.record_suppressed(inertial_t - frame_timestamp)
            }
            IngestOutcome::Rejected { frame_timestamp } => {
                stats.record_rejected(inertial_t - frame_timestamp)
            }
        }

        if stats.dispatched() >= TARGET_DISPATCHES {
            break;
        }
    }

    imu.stop();
    camera.stop();
    drop(vio);
    pose_handle.shutdown().await;
    integrator_handle.shutdown().await;

    println!("{}", stats.summary());
    Ok(())
}
