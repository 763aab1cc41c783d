//! Profile parsing
//!
//! Supports TOML (primary) and JSON formats.

use contracts::{BridgeError, RigProfile};

/// Profile file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ProfileFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML profile
pub fn parse_toml(content: &str) -> Result<RigProfile, BridgeError> {
    toml::from_str(content).map_err(|e| BridgeError::ProfileParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON profile
pub fn parse_json(content: &str) -> Result<RigProfile, BridgeError> {
    serde_json::from_str(content).map_err(|e| BridgeError::ProfileParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a profile in the given format
pub fn parse(content: &str, format: ProfileFormat) -> Result<RigProfile, BridgeError> {
    match format {
        ProfileFormat::Toml => parse_toml(content),
        ProfileFormat::Json => parse_json(content),
    }
}
