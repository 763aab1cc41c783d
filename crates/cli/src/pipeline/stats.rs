//! Pipeline statistics.

use std::time::Duration;

use observability::BridgeStatsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Inertial samples received from ingestion
    pub samples_received: u64,

    /// Frames dispatched to the estimator
    pub frames_dispatched: u64,

    /// Pose/integrator message pairs published
    pub poses_published: u64,

    /// Total duration of the run
    pub duration: Duration,

    /// Per-outcome aggregation
    pub bridge_stats: BridgeStatsAggregator,
}

impl PipelineStats {
    /// Dispatched frames per second over the run
    pub fn dispatch_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.frames_dispatched as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!();
        println!("{}", self.bridge_stats.summary());
        println!("Duration: {:.2}s", self.duration.as_secs_f64());
        println!("Dispatch rate: {:.2} frames/s", self.dispatch_rate());
    }
}
