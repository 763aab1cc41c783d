//! Command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_pipeline;
pub use validate::run_validate;

use anyhow::{Context, Result};
use contracts::RigProfile;
use std::path::Path;

/// Resolve a profile from an explicit path or a built-in rig name
pub(crate) fn resolve_profile(profile: &Option<std::path::PathBuf>, rig: &str) -> Result<RigProfile> {
    match profile {
        Some(path) => load_profile(path),
        None => calibration::builtin(rig)
            .ok_or_else(|| anyhow::anyhow!("Unknown built-in rig '{rig}' (expected euroc or zed)")),
    }
}

fn load_profile(path: &Path) -> Result<RigProfile> {
    if !path.exists() {
        anyhow::bail!("Profile file not found: {}", path.display());
    }
    calibration::ProfileLoader::load_from_path(path)
        .with_context(|| format!("Failed to load profile from {}", path.display()))
}
