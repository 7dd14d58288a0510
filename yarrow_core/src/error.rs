//! Error types for the yarrow_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for yarrow_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entropy source failure (fatal to the invocation, never substituted)
    #[error("Entropy unavailable: {0}")]
    Entropy(String),

    /// Casting/derivation error
    #[error("Cast error: {0}")]
    Cast(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
