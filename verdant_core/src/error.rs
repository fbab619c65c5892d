//! Error types for the verdant_core library.
//!
//! The engine itself never fails; these errors come from the boundary
//! (config files, input files, command-line values).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for verdant_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schedule violates its invariants
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Unknown care type label
    #[error("Unknown care type: {0}")]
    InvalidCareType(String),

    /// Date or timestamp could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
