//! Error types for cometwatch-core.
//!
//! Domain-level failures are deliberately not errors: an unparsable countdown
//! target degrades to `CountdownState::Invalid` and a missing distance
//! degrades to `ProximityCategory::Unknown`, so display code never has to
//! branch on a `Result`. The types here cover the ambient layers only, where
//! an operation can genuinely fail: configuration files and snapshot decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for cometwatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Telemetry snapshot errors
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not prepare the configuration directory
    #[error("Failed to prepare config directory {path}: {message}")]
    DirUnavailable { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Configuration file did not parse as TOML
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Rejected value for a configuration key
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Dot-path key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Telemetry snapshot errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Snapshot JSON did not match the expected shape
    #[error("Failed to decode telemetry snapshot: {0}")]
    DecodeFailed(String),

    /// Snapshot file could not be read
    #[error("Failed to read telemetry snapshot from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
