//! # Calibration
//!
//! Rig profile loading and resolution.
//!
//! Responsibilities:
//! - Parse TOML/JSON profile files
//! - Validate profile legality
//! - Resolve camera-to-IMU transforms into the estimator's extrinsics form
//! - Provide built-in profiles for known rigs
//!
//! # Example
//!
//! ```no_run
//! use calibration::ProfileLoader;
//! use std::path::Path;
//!
//! let profile = ProfileLoader::load_from_path(Path::new("rig.toml")).unwrap();
//! println!("Rig: {}", profile.name);
//! ```

mod extrinsics;
mod parser;
mod profiles;
mod validator;

pub use contracts::RigProfile;
pub use extrinsics::{resolve_extrinsics, resolve_profile};
pub use parser::ProfileFormat;
pub use profiles::{builtin, euroc, zed};

use contracts::BridgeError;
use std::path::Path;

/// Profile loader
///
/// Provides static methods to load profiles from files or strings.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Load a profile from a file path
    ///
    /// Automatically detects format from the file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<RigProfile, BridgeError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a profile from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ProfileFormat) -> Result<RigProfile, BridgeError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }

    /// Serialize a profile to a TOML string
    pub fn to_toml(profile: &RigProfile) -> Result<String, BridgeError> {
        toml::to_string_pretty(profile)
            .map_err(|e| BridgeError::profile_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a profile to a JSON string
    pub fn to_json(profile: &RigProfile) -> Result<String, BridgeError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| BridgeError::profile_parse(format!("JSON serialize error: {e}")))
    }

    /// Infer profile format from file extension
    fn detect_format(path: &Path) -> Result<ProfileFormat, BridgeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| BridgeError::profile_parse("cannot determine file format from extension"))?;

        ProfileFormat::from_extension(ext)
            .ok_or_else(|| BridgeError::profile_parse(format!("unsupported profile format: .{ext}")))
    }
}
