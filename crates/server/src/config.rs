//! Server configuration
//!
//! Loaded from a TOML file. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration:
//!
//! ```toml
//! listen_addr = "[::]:50051"
//! worker_threads = 16
//! max_frame_bytes = 16777216
//!
//! [store]
//! initial_records = 1000000
//! modulus = 100000
//! seed = 42
//! ```

use std::net::{Ipv6Addr, SocketAddr};
use std::path::Path;

use seqdb_core::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::{Result, ServerError};

/// Default TCP port
pub const DEFAULT_PORT: u16 = 50051;

/// Default number of runtime worker threads
pub const DEFAULT_WORKER_THREADS: usize = 16;

/// Default limit on one request or response line
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Settings for a SeqDB server process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_addr: SocketAddr,
    /// Worker threads for the async runtime
    pub worker_threads: usize,
    /// Longest accepted request line, in bytes
    pub max_frame_bytes: usize,
    /// Initial store contents
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            return Err(ServerError::InvalidConfig {
                reason: "worker_threads must be at least 1".into(),
            });
        }
        if self.max_frame_bytes == 0 {
            return Err(ServerError::InvalidConfig {
                reason: "max_frame_bytes must be at least 1".into(),
            });
        }
        self.store.validate()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv6Addr::UNSPECIFIED, DEFAULT_PORT)),
            worker_threads: DEFAULT_WORKER_THREADS,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            store: StoreConfig::default(),
        }
    }
}
