//! Error types for the intersection controller.
//!
//! Validation errors are returned to the caller that made the bad request and
//! never touch shared state. `InternalInconsistency` only ever comes out of
//! `CycleEngine::advance` and is swallowed (logged) by the driver.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Mode string is not one of auto, manual, emergency
    #[error("invalid mode '{0}': expected auto, manual or emergency")]
    InvalidMode(String),

    /// Duration is zero or negative
    #[error("invalid duration {0}s: must be a positive number of seconds")]
    InvalidDuration(i64),

    /// Value outside the four approaches
    #[error("invalid approach '{0}': expected north, east, south or west")]
    InvalidApproach(String),

    /// Corrupted state detected while advancing a tick
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for '{field}': got '{value}'")]
    InvalidValue { field: String, value: String },

    #[error(transparent)]
    Invalid(#[from] ControllerError),
}
