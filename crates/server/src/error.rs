//! Server error type.

use std::path::PathBuf;

use seqdb_core::StoreConfigError;
use thiserror::Error;

/// Result type for server setup and serving
pub type Result<T> = std::result::Result<T, ServerError>;

/// Failures that stop the server from starting or serving
///
/// Per-request failures never surface here; they become error responses.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket or runtime I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`ServerConfig`](crate::ServerConfig)
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A setting is out of range
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Which setting and why
        reason: String,
    },

    /// The store settings are out of range
    #[error("invalid store config: {0}")]
    Store(#[from] StoreConfigError),
}
