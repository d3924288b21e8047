//! Record command handlers.
//!
//! This module implements handlers for the 4 record commands:
//! - Search: Full scan for a value
//! - Add: Append values
//! - Update: Overwrite positions (all-or-nothing)
//! - Delete: Remove positions (all-or-nothing, positions from call start)

use std::sync::Arc;

use seqdb_core::Record;
use seqdb_storage::RecordStore;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Search command.
pub fn search(store: &Arc<RecordStore>, value: i32) -> Result<Output> {
    let records = store.search(value);
    Ok(Output::Records { records })
}

/// Handle Add command.
pub fn add(store: &Arc<RecordStore>, values: Vec<i32>) -> Result<Output> {
    convert_result(store.add(&values))?;
    Ok(Output::Unit)
}

/// Handle Update command.
pub fn update(store: &Arc<RecordStore>, records: Vec<Record>) -> Result<Output> {
    convert_result(store.update(&records))?;
    Ok(Output::Unit)
}

/// Handle Delete command.
pub fn delete(store: &Arc<RecordStore>, indexes: Vec<i32>) -> Result<Output> {
    convert_result(store.delete(&indexes))?;
    Ok(Output::Unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn setup(values: &[i32]) -> Arc<RecordStore> {
        Arc::new(RecordStore::from_values(values.to_vec()))
    }

    #[test]
    fn test_search_returns_records() {
        let store = setup(&[5, 3, 5, 7]);
        let out = search(&store, 5).unwrap();
        assert_eq!(
            out,
            Output::Records {
                records: vec![Record::new(0, 5), Record::new(2, 5)]
            }
        );
    }

    #[test]
    fn test_add_returns_unit() {
        let store = setup(&[]);
        assert_eq!(add(&store, vec![1, 2]).unwrap(), Output::Unit);
        assert_eq!(store.snapshot(), vec![1, 2]);
    }

    #[test]
    fn test_update_out_of_range_maps_error() {
        let store = setup(&[1]);
        let err = update(&store, vec![Record::new(1, 0)]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn test_delete_out_of_range_maps_error() {
        let store = setup(&[1, 2]);
        let err = delete(&store, vec![-3]).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(store.len(), 2);
    }
}
