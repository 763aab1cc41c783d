//! Output publisher - fan-out of derived messages to downstream sinks.

use contracts::{IntegratorInputMessage, OutputSink, PoseMessage};
use tracing::warn;

/// Result of one publish fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Sinks that accepted the pose message
    pub pose_accepted: usize,
    /// Sinks that dropped the pose message
    pub pose_dropped: usize,
    /// Sinks that accepted the integrator input
    pub integrator_accepted: usize,
    /// Sinks that dropped the integrator input
    pub integrator_dropped: usize,
}

/// Fan-out of the two derived messages to any number of registered sinks.
///
/// Push-only and non-blocking: a sink that cannot accept a message right now
/// loses it (counted, logged), the publisher never waits for a consumer.
#[derive(Default)]
pub struct OutputPublisher {
    pose_sinks: Vec<Box<dyn OutputSink<PoseMessage>>>,
    integrator_sinks: Vec<Box<dyn OutputSink<IntegratorInputMessage>>>,
}

impl OutputPublisher {
    /// Create a publisher with no sinks
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pose sink
    pub fn add_pose_sink(&mut self, sink: Box<dyn OutputSink<PoseMessage>>) {
        self.pose_sinks.push(sink);
    }

    /// Register an integrator-input sink
    pub fn add_integrator_sink(&mut self, sink: Box<dyn OutputSink<IntegratorInputMessage>>) {
        self.integrator_sinks.push(sink);
    }

    /// Number of registered sinks (pose, integrator)
    pub fn sink_counts(&self) -> (usize, usize) {
        (self.pose_sinks.len(), self.integrator_sinks.len())
    }

    /// Fan both messages out to every registered sink
    pub fn publish(
        &mut self,
        pose: PoseMessage,
        integrator_input: IntegratorInputMessage,
    ) -> PublishReport {
        let mut report = PublishReport::default();

        for sink in &mut self.pose_sinks {
            if sink.try_publish(pose) {
                report.pose_accepted += 1;
            } else {
                report.pose_dropped += 1;
                warn!(sink = %sink.name(), timestamp = pose.timestamp, "pose message dropped");
                metrics::counter!(
                    "vio_bridge_publish_dropped_total",
                    "sink" => sink.name().to_string(),
                    "message" => "pose"
                )
                .increment(1);
            }
        }

        for sink in &mut self.integrator_sinks {
            if sink.try_publish(integrator_input) {
                report.integrator_accepted += 1;
            } else {
                report.integrator_dropped += 1;
                warn!(
                    sink = %sink.name(),
                    timestamp = integrator_input.timestamp,
                    "integrator input dropped"
                );
                metrics::counter!(
                    "vio_bridge_publish_dropped_total",
                    "sink" => sink.name().to_string(),
                    "message" => "integrator_input"
                )
                .increment(1);
            }
        }

        report
    }
}
