//! Public types for the SeqDB API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// ============================================================================
// Core types
// ============================================================================

pub use seqdb_core::{Record, StoreConfig, StoreConfigError, StoreError, StoreResult, MAX_RECORDS};

// ============================================================================
// Store and execution
// ============================================================================

pub use seqdb_storage::RecordStore;

pub use seqdb_executor::{Command, Error, Executor, Output, SeqDb, StoreInfo};

// ============================================================================
// Network transport
// ============================================================================

pub use seqdb_server::{Client, ClientError, ErrorCode, Server, ServerConfig, ServerError};
