//! Executor error type.

use thiserror::Error;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the executor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An Update or Delete index is outside the current bounds
    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange {
        /// The offending index
        index: i64,
        /// Length it was checked against
        len: usize,
    },

    /// An Add would grow the store past its index space
    #[error("capacity exceeded: {reason}")]
    CapacityExceeded {
        /// Details of the rejected append
        reason: String,
    },

    /// Something that should not happen, such as a mismatched output
    #[error("internal error: {reason}")]
    Internal {
        /// Description of the failure
        reason: String,
    },
}

impl Error {
    /// True if the caller supplied an index the store could not address
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }
}
