//! Hard failures. Malformed report data never ends up here; it is
//! reported as a [`crate::models::Warning`] instead.

use thiserror::Error;

/// Result type alias for auditor operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML config parsing failed
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller cancelled the request
    #[error("listing cancelled")]
    Cancelled,
}

impl AuditError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
