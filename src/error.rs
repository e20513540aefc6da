//! Error types and Result aliases for tutordash-logs

use std::fmt;
use std::path::PathBuf;

/// Result type alias for tutordash-logs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tutordash-logs
#[derive(Debug)]
pub enum Error {
    // === Stream errors ===
    /// A stream frame was not a JSON-encoded string
    MalformedFrame {
        frame: String,
        reason: String,
    },

    /// The event source closed before delivering a single frame
    StreamClosedEarly,

    // === Store errors ===
    /// Failed to read or write the key/value store
    StoreIoFailed {
        path: PathBuf,
        reason: String,
    },

    /// Store contents could not be decoded
    StoreCorrupted {
        path: PathBuf,
        reason: String,
    },

    /// Entry lifetime reaches past the representable date range
    StoreExpiryOverflow {
        key: String,
        ttl_days: u32,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to save configuration file
    ConfigSaveFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Stream errors
            Error::MalformedFrame { frame, reason } => {
                write!(f, "Malformed stream frame '{}': {}", frame, reason)
            }
            Error::StreamClosedEarly => {
                write!(f, "Event stream closed before delivering any frame")
            }

            // Store errors
            Error::StoreIoFailed { path, reason } => {
                write!(f, "Failed to access store '{}': {}", path.display(), reason)
            }
            Error::StoreCorrupted { path, reason } => {
                write!(f, "Store '{}' is corrupted: {}", path.display(), reason)
            }
            Error::StoreExpiryOverflow { key, ttl_days } => {
                write!(f, "Cannot store '{}' for {} days: expiry out of range", key, ttl_days)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::ConfigValidationFailed {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}
