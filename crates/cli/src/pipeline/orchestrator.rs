//! Pipeline orchestrator - coordinates all components.
//!
//! Wires mock sensor sources through ingestion into the bridge core and fans
//! the outputs out to configured sinks. The real estimator is an external
//! engine behind the same trait; the mock keeps the pipeline runnable on any
//! machine.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bridge::{IngestOutcome, OutputPublisher, VioBridge};
use contracts::{
    IntegratorInputMessage, PoseMessage, RigProfile, SinkConfig, SinkType, Timestamped,
};
use estimator::{MockEstimator, MockEstimatorConfig};
use ingestion::{
    CameraPipeline, ImuPipeline, MockCameraSource, MockCameraSourceConfig, MockImuSource,
    MockImuSourceConfig, SharedFrameQueue,
};
use publisher::{create_sink_handle, SinkHandle};
use serde::Serialize;
use tracing::{info, warn};

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rig profile in effect
    pub profile: RigProfile,

    /// Maximum number of dispatched frames (None = unlimited)
    pub max_dispatches: Option<u64>,

    /// Pipeline timeout (None = no timeout)
    pub timeout: Option<Duration>,

    /// Mock IMU sample rate (Hz)
    pub imu_rate_hz: f64,

    /// Mock camera frame rate (Hz)
    pub camera_rate_hz: f64,

    /// Camera frame queue capacity
    pub queue_capacity: usize,

    /// Inertial sample channel capacity
    pub channel_capacity: usize,

    /// Mock estimator warm-up length (stereo updates)
    pub init_after_stereo: u64,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    /// Optional pose JSONL output path
    pub pose_file: Option<PathBuf>,

    /// Optional integrator-input JSONL output path
    pub integrator_file: Option<PathBuf>,

    /// Optional pose UDP target (host:port)
    pub pose_udp: Option<String>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Setup sinks
        info!("Setting up output sinks...");
        let pose_handles = self.create_pose_handles().await?;
        let integrator_handles = self.create_integrator_handles().await?;

        let mut output = OutputPublisher::new();
        for handle in &pose_handles {
            output.add_pose_sink(Box::new(handle.port()));
        }
        for handle in &integrator_handles {
            output.add_integrator_sink(Box::new(handle.port()));
        }

        let (pose_sinks, integrator_sinks) = output.sink_counts();
        info!(pose_sinks, integrator_sinks, "Sinks started");

        // Setup ingestion
        info!("Setting up ingestion...");
        let frame_queue = SharedFrameQueue::with_capacity(self.config.queue_capacity);

        let mut camera_pipeline = CameraPipeline::new(frame_queue.clone());
        camera_pipeline.attach(Box::new(MockCameraSource::new(
            "cam0",
            MockCameraSourceConfig {
                frequency_hz: self.config.camera_rate_hz,
                image_bytes: (self.config.profile.cameras[0].width
                    * self.config.profile.cameras[0].height) as usize,
            },
        )));

        let mut imu_pipeline = ImuPipeline::new(self.config.channel_capacity);
        imu_pipeline.attach(Box::new(MockImuSource::new(
            "imu0",
            MockImuSourceConfig {
                frequency_hz: self.config.imu_rate_hz,
                ..Default::default()
            },
        )));
        let samples = imu_pipeline
            .take_receiver()
            .context("Failed to get imu receiver")?;

        // Setup bridge core
        let mock = MockEstimator::new(MockEstimatorConfig {
            init_after_stereo: self.config.init_after_stereo,
            ..Default::default()
        });
        let mut vio = VioBridge::new(mock, frame_queue, output, self.config.profile.imu);

        info!(rig = %self.config.profile.name, "Bridge configured");

        // Start sensors
        camera_pipeline.start();
        imu_pipeline.start();

        let max_dispatches = self.config.max_dispatches;
        info!(max_dispatches = ?max_dispatches, "Pipeline running (MOCK mode)");

        // Main loop: one coordinator invocation per inertial sample
        let pipeline_task = async {
            let mut stats = PipelineStats::default();

            while let Ok(sample) = samples.recv().await {
                if sample.is_some() {
                    stats.samples_received += 1;
                }
                let inertial_timestamp = sample.as_ref().map(|s| s.timestamp);

                let outcome = vio.on_imu(sample);
                record_outcome(&mut stats, outcome, inertial_timestamp);

                if let Some(max) = max_dispatches {
                    if stats.frames_dispatched >= max {
                        info!(dispatched = stats.frames_dispatched, "Reached dispatch limit");
                        break;
                    }
                }
            }

            stats
        };

        // Run with optional timeout
        let mut stats = if let Some(timeout) = self.config.timeout {
            match tokio::time::timeout(timeout, pipeline_task).await {
                Ok(stats) => stats,
                Err(_) => {
                    warn!(timeout_secs = timeout.as_secs(), "Pipeline timed out");
                    PipelineStats::default()
                }
            }
        } else {
            pipeline_task.await
        };

        // Shutdown
        info!("Shutting down pipeline...");
        imu_pipeline.stop();
        camera_pipeline.stop();
        drop(vio); // releases the sink ports held by the publisher

        for handle in pose_handles {
            handle.shutdown().await;
        }
        for handle in integrator_handles {
            handle.shutdown().await;
        }

        stats.duration = start_time.elapsed();

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            dispatched = stats.frames_dispatched,
            "Pipeline shutdown complete"
        );

        Ok(stats)
    }

    async fn create_pose_handles(&self) -> Result<Vec<SinkHandle<PoseMessage>>> {
        let mut configs = vec![log_sink_config("pose_log")];
        if let Some(path) = &self.config.pose_file {
            configs.push(file_sink_config("pose_file", path));
        }
        if let Some(addr) = &self.config.pose_udp {
            configs.push(udp_sink_config("pose_udp", addr));
        }
        create_handles(&configs).await
    }

    async fn create_integrator_handles(&self) -> Result<Vec<SinkHandle<IntegratorInputMessage>>> {
        let mut configs = vec![log_sink_config("integrator_log")];
        if let Some(path) = &self.config.integrator_file {
            configs.push(file_sink_config("integrator_file", path));
        }
        create_handles(&configs).await
    }
}

async fn create_handles<M>(configs: &[SinkConfig]) -> Result<Vec<SinkHandle<M>>>
where
    M: Serialize + Timestamped + Send + Sync + 'static,
{
    let mut handles = Vec::with_capacity(configs.len());
    for config in configs {
        let handle = create_sink_handle(config)
            .await
            .with_context(|| format!("Failed to create sink '{}'", config.name))?;
        handles.push(handle);
    }
    Ok(handles)
}

fn log_sink_config(name: &str) -> SinkConfig {
    SinkConfig {
        name: name.to_string(),
        sink_type: SinkType::Log,
        queue_capacity: 64,
        params: HashMap::new(),
    }
}

fn file_sink_config(name: &str, path: &PathBuf) -> SinkConfig {
    SinkConfig {
        name: name.to_string(),
        sink_type: SinkType::File,
        queue_capacity: 256,
        params: HashMap::from([("path".to_string(), path.display().to_string())]),
    }
}

fn udp_sink_config(name: &str, addr: &str) -> SinkConfig {
    SinkConfig {
        name: name.to_string(),
        sink_type: SinkType::Udp,
        queue_capacity: 64,
        params: HashMap::from([("addr".to_string(), addr.to_string())]),
    }
}

fn record_outcome(
    stats: &mut PipelineStats,
    outcome: IngestOutcome,
    inertial_timestamp: Option<f64>,
) {
    let gate_wait = |frame_timestamp: f64| {
        inertial_timestamp
            .map(|t| t - frame_timestamp)
            .unwrap_or_default()
    };

    match outcome {
        IngestOutcome::NotStarted => stats.bridge_stats.record_sentinel(),
        IngestOutcome::Waiting => stats.bridge_stats.record_waiting(),
        IngestOutcome::Deferred => stats.bridge_stats.record_deferred(),
        IngestOutcome::Published { frame_timestamp } => {
            stats.frames_dispatched += 1;
            stats.poses_published += 1;
            stats.bridge_stats.record_published(gate_wait(frame_timestamp));
        }
        IngestOutcome::Suppressed { frame_timestamp } => {
            stats.frames_dispatched += 1;
            stats
                .bridge_stats
                .record_suppressed(gate_wait(frame_timestamp));
        }
        IngestOutcome::Rejected { frame_timestamp } => {
            stats.frames_dispatched += 1;
            stats.bridge_stats.record_rejected(gate_wait(frame_timestamp));
        }
    }
}
