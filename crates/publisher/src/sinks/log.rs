//! LogSink - logs message arrival via tracing

use contracts::{BridgeError, MessageSink, Timestamped};
use tracing::{info, instrument};

/// Sink that logs message summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<M> MessageSink<M> for LogSink
where
    M: Timestamped + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_sink_write", skip(self, message), fields(sink = %self.name))]
    async fn write(&mut self, message: &M) -> Result<(), BridgeError> {
        info!(
            sink = %self.name,
            timestamp = message.timestamp(),
            "message received"
        );
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), BridgeError> {
        // Nothing to flush for log sink
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), BridgeError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{PoseMessage, QuatWxyzF, Vec3f};

    #[tokio::test]
    async fn test_log_sink_write() {
        let mut sink = LogSink::new("test_log");
        let message = PoseMessage {
            timestamp: 1.0,
            position: Vec3f::default(),
            orientation: QuatWxyzF::default(),
        };

        let result = sink.write(&message).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(MessageSink::<PoseMessage>::name(&sink), "my_logger");
    }
}
