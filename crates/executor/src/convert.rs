//! Error conversion from store errors.
//!
//! This module maps [`StoreError`] onto the executor's [`Error`] so handlers
//! can use `?` on store results.

use crate::Error;
use seqdb_core::{StoreError, StoreResult};

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::IndexOutOfRange { index, len } => Error::IndexOutOfRange { index, len },
            StoreError::CapacityExceeded {
                current,
                requested,
                limit,
            } => Error::CapacityExceeded {
                reason: format!(
                    "{} records plus {} requested exceeds limit {}",
                    current, requested, limit
                ),
            },
        }
    }
}

/// Convert a store result to an executor result.
pub fn convert_result<T>(result: StoreResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
