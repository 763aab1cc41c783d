//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::RigProfile;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    profile_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ProfileSummary>,
}

#[derive(Serialize)]
struct ProfileSummary {
    name: String,
    camera_resolutions: [String; 2],
    imu_rate_hz: f64,
    num_features: u32,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(profile = %args.profile.display(), "Validating profile");

    let result = validate_profile(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Profile validation failed")
    }
}

fn validate_profile(args: &ValidateArgs) -> ValidationResult {
    let profile_path = args.profile.display().to_string();

    // Check file exists
    if !args.profile.exists() {
        return ValidationResult {
            valid: false,
            profile_path,
            error: Some(format!("File not found: {}", args.profile.display())),
            warnings: None,
            summary: None,
        };
    }

    match calibration::ProfileLoader::load_from_path(&args.profile) {
        Ok(profile) => {
            let warnings = collect_warnings(&profile);
            ValidationResult {
                valid: true,
                profile_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ProfileSummary {
                    name: profile.name.clone(),
                    camera_resolutions: [
                        format!("{}x{}", profile.cameras[0].width, profile.cameras[0].height),
                        format!("{}x{}", profile.cameras[1].width, profile.cameras[1].height),
                    ],
                    imu_rate_hz: profile.imu.nominal_rate_hz,
                    num_features: profile.estimator.num_features,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            profile_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn collect_warnings(profile: &RigProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.imu.nominal_rate_hz < 100.0 {
        warnings.push(format!(
            "nominal_rate_hz {} is low for visual-inertial use; expect degraded tracking",
            profile.imu.nominal_rate_hz
        ));
    }
    if profile.estimator.num_features > 400 {
        warnings.push(format!(
            "num_features {} is high and will slow the estimator",
            profile.estimator.num_features
        ));
    }
    if profile.cameras[0].width != profile.cameras[1].width
        || profile.cameras[0].height != profile.cameras[1].height
    {
        warnings.push("stereo pair has mismatched resolutions".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("Profile is valid: {}", result.profile_path);
        if let Some(summary) = &result.summary {
            println!("  name: {}", summary.name);
            println!(
                "  cameras: {} / {}",
                summary.camera_resolutions[0], summary.camera_resolutions[1]
            );
            println!("  imu rate: {} Hz", summary.imu_rate_hz);
            println!("  features: {}", summary.num_features);
        }
        if let Some(warnings) = &result.warnings {
            for warning in warnings {
                println!("  warning: {warning}");
            }
        }
    } else {
        println!("Profile is INVALID: {}", result.profile_path);
        if let Some(error) = &result.error {
            println!("  error: {error}");
        }
    }
}
