//! Error types for the chronos_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for chronos_core operations
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

    /// A profile (usually an imported snapshot) violates a record invariant
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// User-supplied value could not be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store lock could not be acquired in time
    #[error("Timed out after {waited_ms}ms waiting for lock on {path:?}")]
    LockTimeout { path: PathBuf, waited_ms: u64 },

    /// Generic error
    #[error("{0}")]
    Other(String),
}
