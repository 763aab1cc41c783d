//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

use super::resolve_profile;

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    let profile = resolve_profile(&args.profile, &args.rig)?;

    info!(
        rig = %profile.name,
        imu_rate = args.imu_rate,
        camera_rate = args.camera_rate,
        "Profile loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - profile is valid, exiting");
        print_profile_summary(&profile);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        profile,
        max_dispatches: if args.max_dispatches == 0 {
            None
        } else {
            Some(args.max_dispatches)
        },
        timeout: if args.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(args.timeout))
        },
        imu_rate_hz: args.imu_rate,
        camera_rate_hz: args.camera_rate,
        queue_capacity: args.queue_capacity,
        channel_capacity: args.channel_capacity,
        init_after_stereo: args.init_after,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
        pose_file: args.pose_file.clone(),
        integrator_file: args.integrator_file.clone(),
        pose_udp: args.pose_udp.clone(),
    };

    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        dispatched = stats.frames_dispatched,
                        published = stats.poses_published,
                        duration_secs = stats.duration.as_secs_f64(),
                        "Pipeline completed successfully"
                    );
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Pipeline execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("VIO Bridge finished");
    Ok(())
}

fn print_profile_summary(profile: &contracts::RigProfile) {
    println!("Profile: {}", profile.name);
    for (i, camera) in profile.cameras.iter().enumerate() {
        println!(
            "  camera[{i}]: {}x{} fx={:.1} fy={:.1}",
            camera.width, camera.height, camera.intrinsics[0], camera.intrinsics[1]
        );
    }
    println!(
        "  imu: rate={} Hz, accel_noise={}, gyro_noise={}",
        profile.imu.nominal_rate_hz, profile.imu.accel_noise, profile.imu.gyro_noise
    );
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
