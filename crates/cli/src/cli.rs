//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// VIO Bridge - stereo/IMU synchronization front end for a visual-inertial estimator
#[derive(Parser, Debug)]
#[command(
    name = "vio-bridge",
    author,
    version,
    about = "Visual-inertial bridge pipeline",
    long_about = "Feeds inertial samples to a visual-inertial estimator immediately, \n\
                  releases buffered stereo frames once causally justified by later \n\
                  inertial data, and fans the resulting pose and integrator-input \n\
                  messages out to configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "VIO_BRIDGE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "VIO_BRIDGE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge pipeline with mock sensors and a mock estimator
    Run(RunArgs),

    /// Validate a profile file without running
    Validate(ValidateArgs),

    /// Display profile information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Built-in rig profile name (euroc or zed)
    #[arg(long, default_value = "euroc", env = "VIO_BRIDGE_RIG")]
    pub rig: String,

    /// Path to a profile file (TOML or JSON); overrides --rig
    #[arg(short, long, env = "VIO_BRIDGE_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Maximum number of dispatched frames (0 = unlimited)
    #[arg(long, default_value = "0", env = "VIO_BRIDGE_MAX_DISPATCHES")]
    pub max_dispatches: u64,

    /// Pipeline timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "VIO_BRIDGE_TIMEOUT")]
    pub timeout: u64,

    /// Mock IMU sample rate (Hz)
    #[arg(long, default_value = "200.0")]
    pub imu_rate: f64,

    /// Mock camera frame rate (Hz)
    #[arg(long, default_value = "20.0")]
    pub camera_rate: f64,

    /// Camera frame queue capacity
    #[arg(long, default_value = "8", env = "VIO_BRIDGE_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Inertial sample channel capacity
    #[arg(long, default_value = "256", env = "VIO_BRIDGE_CHANNEL_CAPACITY")]
    pub channel_capacity: usize,

    /// Stereo updates before the mock estimator reports initialized
    #[arg(long, default_value = "3")]
    pub init_after: u64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9100", env = "VIO_BRIDGE_METRICS_PORT")]
    pub metrics_port: u16,

    /// Append pose messages to this JSONL file
    #[arg(long)]
    pub pose_file: Option<PathBuf>,

    /// Append integrator-input messages to this JSONL file
    #[arg(long)]
    pub integrator_file: Option<PathBuf>,

    /// Stream pose messages to this UDP address (host:port)
    #[arg(long)]
    pub pose_udp: Option<String>,

    /// Validate the profile and exit without running the pipeline
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the profile file to validate
    #[arg(short, long)]
    pub profile: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Built-in rig profile name (euroc or zed)
    #[arg(long, default_value = "euroc")]
    pub rig: String,

    /// Path to a profile file; overrides --rig
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show resolved camera extrinsics
    #[arg(long)]
    pub extrinsics: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
