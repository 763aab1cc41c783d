//! Sink handle factory - configuration to running worker

use contracts::{SinkConfig, SinkType, Timestamped};
use serde::Serialize;
use tracing::instrument;

use crate::error::PublisherError;
use crate::handle::SinkHandle;
use crate::sinks::{FileSink, LogSink, UdpSink};

/// Create a running [`SinkHandle`] from configuration
#[instrument(
    name = "publisher_create_sink_handle",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub async fn create_sink_handle<M>(config: &SinkConfig) -> Result<SinkHandle<M>, PublisherError>
where
    M: Serialize + Timestamped + Send + Sync + 'static,
{
    match config.sink_type {
        SinkType::Log => {
            let sink = LogSink::new(&config.name);
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params)
                .map_err(|e| PublisherError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
        SinkType::Udp => {
            let sink = UdpSink::from_params(&config.name, &config.params)
                .await
                .map_err(|e| PublisherError::sink_creation(&config.name, e))?;
            Ok(SinkHandle::spawn(sink, config.queue_capacity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{IntegratorInputMessage, PoseMessage};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_create_log_handles_for_both_messages() {
        let config = SinkConfig {
            name: "log".to_string(),
            sink_type: SinkType::Log,
            queue_capacity: 8,
            params: HashMap::new(),
        };

        let pose_handle = create_sink_handle::<PoseMessage>(&config).await.unwrap();
        let integ_handle = create_sink_handle::<IntegratorInputMessage>(&config)
            .await
            .unwrap();

        assert_eq!(pose_handle.name(), "log");
        pose_handle.shutdown().await;
        integ_handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_create_udp_handle_requires_addr() {
        let config = SinkConfig {
            name: "udp".to_string(),
            sink_type: SinkType::Udp,
            queue_capacity: 8,
            params: HashMap::new(),
        };

        assert!(create_sink_handle::<PoseMessage>(&config).await.is_err());
    }
}
