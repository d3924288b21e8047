//! Ping and Info handlers.

use std::sync::Arc;

use seqdb_storage::RecordStore;

use crate::output::StoreInfo;
use crate::{Output, Result};

/// Handle Ping command: report the crate version.
pub fn ping() -> Result<Output> {
    Ok(Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle Info command: report current size and startup settings.
pub fn info(
    store: &Arc<RecordStore>,
    initial_records: usize,
    modulus: Option<i32>,
) -> Result<Output> {
    Ok(Output::Info(StoreInfo {
        len: store.len(),
        initial_records,
        modulus,
    }))
}
