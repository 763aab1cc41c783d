//! FileSink - appends messages to a JSONL file

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{BridgeError, MessageSink, Timestamped};
use serde::Serialize;
use tracing::{debug, error, instrument};

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output file path
    pub path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map
    ///
    /// Without an explicit `path`, records land in `./output` under a
    /// timestamped file name.
    pub fn from_params(name: &str, params: &HashMap<String, String>) -> Self {
        let path = params.get("path").map(PathBuf::from).unwrap_or_else(|| {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            PathBuf::from(format!("./output/{name}-{stamp}.jsonl"))
        });

        Self { path }
    }
}

/// Sink that appends one JSON record per message
pub struct FileSink {
    name: String,
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileSink {
    /// Create a new FileSink
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&config.path)?;

        Ok(Self {
            name: name.into(),
            writer: BufWriter::new(file),
            path: config.path,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let name = name.into();
        let config = FileSinkConfig::from_params(&name, params);
        Self::new(name, config)
    }

    /// Path records are written to
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn append<M: Serialize>(&mut self, message: &M) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, message)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.writer.write_all(b"\n")
    }
}

impl<M> MessageSink<M> for FileSink
where
    M: Serialize + Timestamped + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, message),
        fields(sink = %self.name, timestamp = message.timestamp())
    )]
    async fn write(&mut self, message: &M) -> Result<(), BridgeError> {
        self.append(message).map_err(|e| {
            error!(sink = %self.name, error = %e, "Write failed");
            BridgeError::sink_write(&self.name, e.to_string())
        })
    }

    #[instrument(name = "file_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), BridgeError> {
        self.writer
            .flush()
            .map_err(|e| BridgeError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "file_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), BridgeError> {
        self.writer
            .flush()
            .map_err(|e| BridgeError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, path = %self.path.display(), "FileSink closed");
        Ok(())
    }
}
