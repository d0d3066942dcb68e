//! Error types for `issue_tracker`.
//!
//! Request-level failures are not errors here: the HTTP layer reports
//! them as JSON payloads. These variants cover startup and transport.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for the service front end.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Configuration Errors ===
    /// Configuration value or file is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file given explicitly does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// YAML config could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Server Errors ===
    /// Listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Server loop terminated with an error.
    #[error("Server error: {0}")]
    Server(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
