//! `info` command implementation.

use anyhow::{Context, Result};

use crate::cli::InfoArgs;

use super::resolve_profile;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let profile = resolve_profile(&args.profile, &args.rig)?;

    if args.json {
        let json = serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Profile: {}", profile.name);
    println!();
    for (i, camera) in profile.cameras.iter().enumerate() {
        let [fx, fy, cx, cy, ..] = camera.intrinsics;
        println!("camera[{i}] ({}x{})", camera.width, camera.height);
        println!("  fx={fx:.3} fy={fy:.3} cx={cx:.3} cy={cy:.3}");
        println!("  fisheye: {}", camera.fisheye);
    }
    println!();
    println!("imu");
    println!("  nominal rate: {} Hz", profile.imu.nominal_rate_hz);
    println!("  accel noise/walk: {} / {}", profile.imu.accel_noise, profile.imu.accel_walk);
    println!("  gyro noise/walk: {} / {}", profile.imu.gyro_noise, profile.imu.gyro_walk);
    println!(
        "  gravity: ({}, {}, {})",
        profile.imu.gravity.x, profile.imu.gravity.y, profile.imu.gravity.z
    );
    println!();
    println!("estimator");
    println!("  init window: {} s (thresh {})", profile.estimator.init_window_time, profile.estimator.init_imu_thresh);
    println!("  features: {} (fast {}, grid {}x{})", profile.estimator.num_features, profile.estimator.fast_threshold, profile.estimator.grid_x, profile.estimator.grid_y);
    println!("  stereo: {}", profile.estimator.use_stereo);

    if args.extrinsics {
        println!();
        println!("resolved extrinsics");
        for (i, resolved) in calibration::resolve_profile(&profile).iter().enumerate() {
            let q = resolved.rotation;
            let t = resolved.translation;
            println!("  camera[{i}] q(xyzw)=({:.6}, {:.6}, {:.6}, {:.6})", q.x, q.y, q.z, q.w);
            println!("            t=({:.6}, {:.6}, {:.6})", t.x, t.y, t.z);
        }
    }

    Ok(())
}
