//! Command results.

use seqdb_core::Record;
use serde::{Deserialize, Serialize};

/// Size and settings of a running store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    /// Current number of values
    pub len: usize,
    /// Number of values the store started with
    pub initial_records: usize,
    /// Exclusive upper bound of the generated startup values; absent when
    /// the store was opened over caller-supplied values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulus: Option<i32>,
}

/// Result of executing a [`Command`](crate::Command)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Output {
    /// Matches from a search, in ascending index order
    Records {
        /// Matching records
        records: Vec<Record>,
    },

    /// Empty acknowledgment of a successful mutation
    Unit,

    /// Reply to a ping
    Pong {
        /// Server crate version
        version: String,
    },

    /// Store size and settings
    Info(StoreInfo),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_wire_shape() {
        let out = Output::Records {
            records: vec![Record::new(0, 5), Record::new(2, 5)],
        };
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"type":"Records","records":[{"index":0,"value":5},{"index":2,"value":5}]}"#
        );
    }

    #[test]
    fn test_unit_wire_shape() {
        assert_eq!(serde_json::to_string(&Output::Unit).unwrap(), r#"{"type":"Unit"}"#);
    }

    #[test]
    fn test_info_wire_shape() {
        let out = Output::Info(StoreInfo {
            len: 3,
            initial_records: 4,
            modulus: Some(10),
        });
        let json = serde_json::to_string(&out).unwrap();
        let back: Output = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
        assert!(json.starts_with(r#"{"type":"Info""#));
    }

    #[test]
    fn test_info_without_modulus_omits_field() {
        let out = Output::Info(StoreInfo {
            len: 2,
            initial_records: 2,
            modulus: None,
        });
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"type":"Info","len":2,"initial_records":2}"#
        );
    }
}
