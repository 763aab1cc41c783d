//! Layered error definitions
//!
//! Categorized by source: profile / transform / sink

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum BridgeError {
    // ===== Profile Errors =====
    /// Profile parse error
    #[error("profile parse error: {message}")]
    ProfileParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Profile validation error
    #[error("profile validation error at '{field}': {message}")]
    ProfileValidation { field: String, message: String },

    // ===== Transform Errors =====
    /// Non-finite scalar produced by the estimator
    ///
    /// Signals an upstream invariant violation; the dispatch's outputs are
    /// dropped instead of published.
    #[error("non-finite output in '{field}'")]
    NonFiniteOutput { field: &'static str },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Sink creation error
    #[error("failed to create sink '{sink_name}': {message}")]
    SinkCreation { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Create profile parse error
    pub fn profile_parse(message: impl Into<String>) -> Self {
        Self::ProfileParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create profile validation error
    pub fn profile_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProfileValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink creation error
    pub fn sink_creation(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
