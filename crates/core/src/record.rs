//! Record projection
//!
//! A record is not stored anywhere. It is how a position in the sequence is
//! reported to callers: the index the value occupied when it was observed,
//! plus the value itself.
//!
//! Indices are positional. Any insertion or deletion ahead of a record
//! invalidates its index, so callers must not cache records across
//! mutating calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of values the store can hold.
///
/// Indices travel as `i32` on the wire, so the highest addressable position
/// is `i32::MAX`.
pub const MAX_RECORDS: usize = i32::MAX as usize + 1;

/// A `(index, value)` pair describing one element at observation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Position of the value in the sequence when it was observed
    pub index: i32,
    /// The stored value
    pub value: i32,
}

impl Record {
    /// Create a new record
    pub fn new(index: i32, value: i32) -> Self {
        Self { index, value }
    }
}

impl From<(i32, i32)> for Record {
    fn from((index, value): (i32, i32)) -> Self {
        Self { index, value }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.index, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_tuple() {
        let record: Record = (3, 9).into();
        assert_eq!(record, Record::new(3, 9));
    }

    #[test]
    fn test_record_display() {
        assert_eq!(Record::new(0, 5).to_string(), "{0, 5}");
    }

    #[test]
    fn test_record_wire_shape() {
        let json = serde_json::to_string(&Record::new(2, -7)).unwrap();
        assert_eq!(json, r#"{"index":2,"value":-7}"#);
    }

    #[test]
    fn test_max_records_covers_i32_index_space() {
        assert_eq!(MAX_RECORDS - 1, i32::MAX as usize);
    }
}
