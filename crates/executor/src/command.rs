//! Commands accepted by the executor.
//!
//! Serialized with an internal `method` tag so a request reads like the
//! remote call it stands for:
//!
//! ```text
//! {"method":"Search","value":5}
//! {"method":"Add","values":[1,2]}
//! {"method":"Update","records":[{"index":0,"value":7}]}
//! {"method":"Delete","indexes":[0,3]}
//! ```
//!
//! Absent list fields decode as empty lists, which every mutation treats as
//! a no-op.

use seqdb_core::Record;
use serde::{Deserialize, Serialize};

/// A single store request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Command {
    /// Find every record whose value equals `value`
    Search {
        /// Value to match
        value: i32,
    },

    /// Append values to the end of the sequence
    Add {
        /// Values to append, in order
        #[serde(default)]
        values: Vec<i32>,
    },

    /// Overwrite values at the given positions
    Update {
        /// Positions and their new values
        #[serde(default)]
        records: Vec<Record>,
    },

    /// Remove values at the given positions
    Delete {
        /// Positions to remove
        #[serde(default)]
        indexes: Vec<i32>,
    },

    /// Liveness check
    Ping,

    /// Report store size and settings
    Info,
}

impl Command {
    /// Method name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search { .. } => "Search",
            Command::Add { .. } => "Add",
            Command::Update { .. } => "Update",
            Command::Delete { .. } => "Delete",
            Command::Ping => "Ping",
            Command::Info => "Info",
        }
    }

    /// True if the command takes the exclusive lock
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Update { .. } | Command::Delete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_wire_shape() {
        let cmd: Command = serde_json::from_str(r#"{"method":"Search","value":5}"#).unwrap();
        assert_eq!(cmd, Command::Search { value: 5 });
    }

    #[test]
    fn test_update_wire_shape() {
        let cmd = Command::Update {
            records: vec![Record::new(0, 7)],
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"method":"Update","records":[{"index":0,"value":7}]}"#);
    }

    #[test]
    fn test_absent_lists_decode_empty() {
        let add: Command = serde_json::from_str(r#"{"method":"Add"}"#).unwrap();
        assert_eq!(add, Command::Add { values: vec![] });

        let delete: Command = serde_json::from_str(r#"{"method":"Delete"}"#).unwrap();
        assert_eq!(delete, Command::Delete { indexes: vec![] });
    }

    #[test]
    fn test_unit_commands() {
        let ping: Command = serde_json::from_str(r#"{"method":"Ping"}"#).unwrap();
        assert_eq!(ping, Command::Ping);
        assert!(!ping.is_write());
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result: std::result::Result<Command, _> =
            serde_json::from_str(r#"{"method":"Truncate"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_outside_i32_rejected() {
        let result: std::result::Result<Command, _> =
            serde_json::from_str(r#"{"method":"Search","value":4294967296}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_write() {
        assert!(Command::Add { values: vec![] }.is_write());
        assert!(Command::Update { records: vec![] }.is_write());
        assert!(Command::Delete { indexes: vec![] }.is_write());
        assert!(!Command::Search { value: 0 }.is_write());
        assert!(!Command::Info.is_write());
    }
}
