//! Mock sensor sources
//!
//! Implement `ImuSource` / `CameraSource` with background threads generating
//! deterministic synthetic data. Used for testing and development without
//! real devices attached.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use contracts::{
    CameraFrameCallback, CameraSource, ImuSample, ImuSampleCallback, ImuSource, StereoFrame, Vec3,
};
use tracing::{debug, trace};

/// Mock IMU source configuration
#[derive(Debug, Clone)]
pub struct MockImuSourceConfig {
    /// Sample frequency (Hz)
    pub frequency_hz: f64,

    /// Number of `None` sentinels emitted before the first real sample
    pub leading_sentinels: u32,

    /// Peak angular rate of the synthetic motion (rad/s)
    pub gyro_amplitude: f64,

    /// Peak specific-force excursion on top of gravity (m/s²)
    pub accel_amplitude: f64,
}

impl Default for MockImuSourceConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 200.0,
            leading_sentinels: 0,
            gyro_amplitude: 0.4,
            accel_amplitude: 0.8,
        }
    }
}

/// Mock IMU
///
/// Generates a smooth sinusoidal motion profile at the configured rate on a
/// background thread. Samples are pushed through the registered callback,
/// matching the push model of real device drivers.
pub struct MockImuSource {
    name: String,
    config: MockImuSourceConfig,
    listening: Arc<AtomicBool>,
}

impl MockImuSource {
    /// Create a new mock IMU
    pub fn new(name: impl Into<String>, config: MockImuSourceConfig) -> Self {
        Self {
            name: name.into(),
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a mock IMU with default configuration
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, MockImuSourceConfig::default())
    }

    fn sample_at(config: &MockImuSourceConfig, t: f64) -> ImuSample {
        let phase = t * std::f64::consts::TAU * 0.25;
        ImuSample {
            timestamp: t,
            angular_velocity: Vec3::new(
                config.gyro_amplitude * phase.sin(),
                config.gyro_amplitude * 0.5 * phase.cos(),
                config.gyro_amplitude * 0.25 * (phase * 0.5).sin(),
            ),
            linear_acceleration: Vec3::new(
                config.accel_amplitude * phase.cos(),
                config.accel_amplitude * 0.5 * phase.sin(),
                -9.81 + config.accel_amplitude * 0.1 * phase.sin(),
            ),
        }
    }
}

impl ImuSource for MockImuSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn listen(&self, callback: ImuSampleCallback) {
        // Idempotent: if already listening, don't start again
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let name = self.name.clone();
        let config = self.config.clone();
        let listening = self.listening.clone();
        let interval = Duration::from_secs_f64(1.0 / config.frequency_hz);

        thread::spawn(move || {
            debug!(source = %name, frequency_hz = config.frequency_hz, "mock imu started");

            for _ in 0..config.leading_sentinels {
                if !listening.load(Ordering::Relaxed) {
                    break;
                }
                callback(None);
                thread::sleep(interval);
            }

            let start = std::time::Instant::now();
            while listening.load(Ordering::Relaxed) {
                let t = start.elapsed().as_secs_f64();
                let sample = Self::sample_at(&config, t);
                callback(Some(sample));
                trace!(source = %name, timestamp = t, "mock imu sample");
                thread::sleep(interval);
            }

            debug!(source = %name, "mock imu stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

/// Mock camera source configuration
#[derive(Debug, Clone)]
pub struct MockCameraSourceConfig {
    /// Frame frequency (Hz)
    pub frequency_hz: f64,

    /// Size of each eye's opaque buffer (bytes)
    pub image_bytes: usize,
}

impl Default for MockCameraSourceConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 20.0,
            image_bytes: 752 * 480,
        }
    }
}

/// Mock stereo camera
///
/// Produces left/right pairs of opaque buffers at the configured rate.
pub struct MockCameraSource {
    name: String,
    config: MockCameraSourceConfig,
    listening: Arc<AtomicBool>,
}

impl MockCameraSource {
    /// Create a new mock camera
    pub fn new(name: impl Into<String>, config: MockCameraSourceConfig) -> Self {
        Self {
            name: name.into(),
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a mock camera with default configuration
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, MockCameraSourceConfig::default())
    }
}

impl CameraSource for MockCameraSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn listen(&self, callback: CameraFrameCallback) {
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let name = self.name.clone();
        let config = self.config.clone();
        let listening = self.listening.clone();
        let interval = Duration::from_secs_f64(1.0 / config.frequency_hz);

        thread::spawn(move || {
            debug!(source = %name, frequency_hz = config.frequency_hz, "mock camera started");

            // Both eyes share one static payload; content is opaque downstream
            let left = Bytes::from(vec![0x40u8; config.image_bytes]);
            let right = Bytes::from(vec![0x80u8; config.image_bytes]);

            let start = std::time::Instant::now();
            let mut frame_id: u64 = 0;
            while listening.load(Ordering::Relaxed) {
                let t = start.elapsed().as_secs_f64();
                frame_id += 1;
                callback(StereoFrame {
                    timestamp: t,
                    left: left.clone(),
                    right: right.clone(),
                });
                trace!(source = %name, frame_id, timestamp = t, "mock stereo frame");
                thread::sleep(interval);
            }

            debug!(source = %name, "mock camera stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}
