//! # Publisher
//!
//! Sink-side delivery of the bridge outputs.
//!
//! Responsibilities:
//! - One bounded queue + worker task per sink
//! - Isolate slow sinks, never block the coordinator
//! - Concrete sinks: log, JSONL file, UDP

pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

mod factory;

pub use contracts::{MessageSink, OutputSink, SinkConfig, SinkType, Timestamped};
pub use error::PublisherError;
pub use factory::create_sink_handle;
pub use handle::{SinkHandle, SinkPort};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{FileSink, LogSink, UdpSink};
