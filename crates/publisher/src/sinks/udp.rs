//! UdpSink - fire-and-forget JSON datagrams

use std::collections::HashMap;
use std::net::SocketAddr;

use contracts::{BridgeError, MessageSink, Timestamped};
use serde::Serialize;
use tokio::net::UdpSocket;
use tracing::{debug, instrument, warn};

/// Configuration for UdpSink
#[derive(Debug, Clone)]
pub struct UdpSinkConfig {
    /// Target address
    pub addr: SocketAddr,

    /// Max datagram size (UDP typically 65507 for IPv4)
    pub max_packet_size: usize,
}

impl UdpSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let addr_str = params
            .get("addr")
            .ok_or_else(|| "missing 'addr' parameter".to_string())?;

        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e| format!("invalid address '{addr_str}': {e}"))?;

        let max_packet_size = params
            .get("max_packet_size")
            .and_then(|s| s.parse().ok())
            .unwrap_or(65000);

        Ok(Self {
            addr,
            max_packet_size,
        })
    }
}

/// Sink that sends each message as one JSON datagram
pub struct UdpSink {
    name: String,
    config: UdpSinkConfig,
    socket: UdpSocket,
}

impl UdpSink {
    /// Create a new UdpSink bound to an ephemeral local port
    #[instrument(name = "udp_sink_new", skip(name, config))]
    pub async fn new(name: impl Into<String>, config: UdpSinkConfig) -> std::io::Result<Self> {
        let name = name.into();
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(&config.addr).await?;

        debug!(sink = %name, target = %config.addr, "UdpSink connected");

        Ok(Self {
            name,
            config,
            socket,
        })
    }

    /// Create from params map (for factory)
    pub async fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let config = UdpSinkConfig::from_params(params)?;
        Self::new(name, config).await.map_err(|e| e.to_string())
    }
}

impl<M> MessageSink<M> for UdpSink
where
    M: Serialize + Timestamped + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "udp_sink_write",
        skip(self, message),
        fields(sink = %self.name, timestamp = message.timestamp())
    )]
    async fn write(&mut self, message: &M) -> Result<(), BridgeError> {
        let payload = serde_json::to_vec(message)
            .map_err(|e| BridgeError::sink_write(&self.name, e.to_string()))?;

        if payload.len() > self.config.max_packet_size {
            warn!(
                sink = %self.name,
                size = payload.len(),
                limit = self.config.max_packet_size,
                "datagram exceeds size limit, dropped"
            );
            return Err(BridgeError::sink_write(&self.name, "datagram too large"));
        }

        self.socket
            .send(&payload)
            .await
            .map_err(|e| BridgeError::sink_write(&self.name, e.to_string()))?;
        Ok(())
    }

    #[instrument(name = "udp_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), BridgeError> {
        // Datagrams are not buffered
        Ok(())
    }

    #[instrument(name = "udp_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), BridgeError> {
        debug!(sink = %self.name, "UdpSink closed");
        Ok(())
    }
}
