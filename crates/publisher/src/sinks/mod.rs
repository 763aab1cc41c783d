//! Concrete sink implementations

mod file;
mod log;
mod udp;

pub use file::{FileSink, FileSinkConfig};
pub use log::LogSink;
pub use udp::{UdpSink, UdpSinkConfig};
