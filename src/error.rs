//! Error types for the SAF forwarding strategy
//!
//! The forwarding event handlers never fail: exhaustion, duplicate requests
//! and stale tracker state are all resolved inside the strategy. These types
//! cover the surfaces around it: configuration, persistence and name parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for strategy operations
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Packet errors
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),
}

/// Configuration problems detected at construction time
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value the strategy cannot be built without is missing
    #[error("Missing required field: {field}")]
    MissingRequiredField {
        /// Name of the missing field
        field: String,
    },

    /// A tunable is outside its accepted range
    #[error("Invalid value for {parameter}: {value}")]
    InvalidParameter {
        /// Name of the tunable as it appears on disk
        parameter: String,
        /// The rejected value
        value: String,
    },
}

/// Errors from persisting or loading configuration
#[derive(Error, Debug)]
pub enum StorageError {
    /// File does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {reason}")]
    SerializationFailed {
        /// Underlying failure description
        reason: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from constructing packets
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PacketError {
    /// The name URI could not be parsed
    #[error("Invalid name {uri:?}: {reason}")]
    InvalidName {
        /// The offending URI
        uri: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StrategyError>;
