//! Core types for SeqDB
//!
//! This crate defines the types shared by every layer of the record store:
//! - Record: a `(index, value)` pair observed at one point in time
//! - StoreError: failures raised by the store's operations
//! - StoreConfig: how the store is pre-populated at startup

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod record;

pub use config::{StoreConfig, StoreConfigError};
pub use error::{StoreError, StoreResult};
pub use record::{Record, MAX_RECORDS};
