//! Output sink traits and sink configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::BridgeError;

/// Synchronous, non-blocking fan-out seam used by the output publisher.
///
/// Implementations must return immediately: `true` when the message was
/// accepted, `false` when it was dropped (queue full, worker gone). The
/// publisher never retries; a dropped output is counted, not re-sent.
pub trait OutputSink<M>: Send {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Hand off one message without blocking
    fn try_publish(&mut self, message: M) -> bool;
}

/// Asynchronous sink contract
///
/// All concrete sink implementations (log, file, network) implement this;
/// a worker task drains a bounded queue into it.
#[trait_variant::make(MessageSink: Send)]
pub trait LocalMessageSink<M> {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one message
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, message: &M) -> Result<(), BridgeError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), BridgeError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), BridgeError>;
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Worker queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    64
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log output
    Log,
    /// JSONL file output
    File,
    /// Network output (UDP)
    Udp,
}
