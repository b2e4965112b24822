//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Configuration errors surface synchronously at configuration time;
//! detection-time faults are caught per-detector and degrade to "fewer spans
//! detected" rather than propagating out of the engine.

use thiserror::Error;

/// Main cloak error type
#[derive(Debug, Error)]
pub enum CloakError {
    /// Configuration-related errors (unknown strategy, bad locale code,
    /// missing pattern library)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid regex syntax reported at mutation or load time
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A model collaborator failed or returned malformed output
    #[error("Model error: {0}")]
    Model(String),

    /// Detector-internal faults
    #[error("Detection error: {0}")]
    Detection(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CloakError {
    /// Build a pattern error from a failed regex compilation
    pub fn pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        CloakError::Pattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CloakError {
    fn from(err: std::io::Error) -> Self {
        CloakError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CloakError {
    fn from(err: serde_json::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CloakError {
    fn from(err: toml::de::Error) -> Self {
        CloakError::Configuration(format!("TOML parse error: {err}"))
    }
}
