//! Store error types
//!
//! Every fallible store operation returns [`StoreResult`]. Errors never
//! poison the store: a failed call affects only itself and, because Update
//! and Delete validate before writing, leaves the sequence untouched.
//!
//! ## Error Taxonomy
//!
//! | Condition | Raised by | Error |
//! |-----------|-----------|-------|
//! | Index outside `[0, len)` | Update, Delete | `IndexOutOfRange` |
//! | Append past the i32 index space | Add | `CapacityExceeded` |

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A supplied index is not within the current bounds of the sequence
    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange {
        /// The offending index, as supplied by the caller
        index: i64,
        /// Length of the sequence the index was checked against
        len: usize,
    },

    /// An append would grow the sequence past the addressable index space
    #[error("capacity exceeded: {current} records plus {requested} exceeds limit {limit}")]
    CapacityExceeded {
        /// Length before the append
        current: usize,
        /// Number of values the caller tried to append
        requested: usize,
        /// Maximum number of records
        limit: usize,
    },
}

impl StoreError {
    /// Create an out-of-range error
    pub fn out_of_range(index: impl Into<i64>, len: usize) -> Self {
        StoreError::IndexOutOfRange {
            index: index.into(),
            len,
        }
    }

    /// True if this error was caused by a caller-supplied index
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, StoreError::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = StoreError::out_of_range(4, 4);
        assert_eq!(err.to_string(), "index 4 out of range for 4 records");
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_negative_index_message() {
        let err = StoreError::out_of_range(-1, 10);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_capacity_exceeded_is_not_out_of_range() {
        let err = StoreError::CapacityExceeded {
            current: 10,
            requested: 5,
            limit: 12,
        };
        assert!(!err.is_out_of_range());
        assert!(err.to_string().contains("limit 12"));
    }
}
