//! Command dispatch.

use std::sync::Arc;

use seqdb_core::StoreConfig;
use seqdb_storage::RecordStore;
use tracing::{debug, warn};

use crate::handlers::{admin, records};
use crate::{Command, Output, Result};

/// Dispatches commands to the record store
///
/// Holds only shared handles, so clones are cheap and every clone sees the
/// same store. The transport keeps one executor and clones it into each
/// request task.
#[derive(Debug, Clone)]
pub struct Executor {
    store: Arc<RecordStore>,
    initial_records: usize,
    modulus: Option<i32>,
}

impl Executor {
    /// Create an executor over `store`, which was built from `config`
    pub fn new(store: Arc<RecordStore>, config: StoreConfig) -> Self {
        Self {
            store,
            initial_records: config.initial_records,
            modulus: Some(config.modulus),
        }
    }

    /// Create an executor over a store filled by the caller
    ///
    /// Info reports the store's current length as its initial size and no
    /// modulus.
    pub fn from_store(store: Arc<RecordStore>) -> Self {
        let initial_records = store.len();
        Self {
            store,
            initial_records,
            modulus: None,
        }
    }

    /// Build a store from `config` and wrap it
    pub fn populate(config: StoreConfig) -> std::result::Result<Self, seqdb_core::StoreConfigError> {
        let store = RecordStore::populate(&config)?;
        Ok(Self::new(Arc::new(store), config))
    }

    /// The store this executor dispatches to
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Execute one command
    ///
    /// Blocks while waiting for the store lock and for the operation itself.
    /// Async callers should run this on a blocking-capable thread.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let result = match cmd {
            Command::Search { value } => records::search(&self.store, value),
            Command::Add { values } => records::add(&self.store, values),
            Command::Update { records } => records::update(&self.store, records),
            Command::Delete { indexes } => records::delete(&self.store, indexes),
            Command::Ping => admin::ping(),
            Command::Info => admin::info(&self.store, self.initial_records, self.modulus),
        };

        match &result {
            Ok(_) => debug!(command = name, "executed"),
            Err(err) => warn!(command = name, error = %err, "command failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Record, StoreInfo};

    fn executor(values: &[i32]) -> Executor {
        let store = Arc::new(RecordStore::from_values(values.to_vec()));
        Executor::new(store, StoreConfig::new(values.len(), 10))
    }

    #[test]
    fn test_scenario_search_then_delete() {
        let ex = executor(&[5, 3, 5, 7]);

        let out = ex.execute(Command::Search { value: 5 }).unwrap();
        assert_eq!(
            out,
            Output::Records {
                records: vec![Record::new(0, 5), Record::new(2, 5)]
            }
        );

        ex.execute(Command::Delete { indexes: vec![0] }).unwrap();
        assert_eq!(ex.store().snapshot(), vec![3, 5, 7]);
    }

    #[test]
    fn test_info_reports_len_and_settings() {
        let ex = executor(&[1, 2, 3]);
        ex.execute(Command::Add { values: vec![4] }).unwrap();
        assert_eq!(
            ex.execute(Command::Info).unwrap(),
            Output::Info(StoreInfo {
                len: 4,
                initial_records: 3,
                modulus: Some(10),
            })
        );
    }

    #[test]
    fn test_info_from_caller_store_has_no_modulus() {
        let store = Arc::new(RecordStore::from_values(vec![9, 9]));
        let ex = Executor::from_store(store);
        ex.execute(Command::Delete { indexes: vec![0] }).unwrap();
        assert_eq!(
            ex.execute(Command::Info).unwrap(),
            Output::Info(StoreInfo {
                len: 1,
                initial_records: 2,
                modulus: None,
            })
        );
    }

    #[test]
    fn test_ping() {
        let ex = executor(&[]);
        match ex.execute(Command::Ping).unwrap() {
            Output::Pong { version } => assert!(!version.is_empty()),
            other => panic!("Expected Pong, got {:?}", other),
        }
    }

    #[test]
    fn test_error_does_not_affect_later_calls() {
        let ex = executor(&[1, 2]);
        let err = ex
            .execute(Command::Update {
                records: vec![Record::new(2, 0)],
            })
            .unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 2, len: 2 });

        ex.execute(Command::Update {
            records: vec![Record::new(1, 0)],
        })
        .unwrap();
        assert_eq!(ex.store().snapshot(), vec![1, 0]);
    }

    #[test]
    fn test_clones_share_store() {
        let ex = executor(&[]);
        let other = ex.clone();
        other.execute(Command::Add { values: vec![8] }).unwrap();
        assert_eq!(ex.store().len(), 1);
    }

    #[test]
    fn test_populate() {
        let ex = Executor::populate(StoreConfig::new(50, 5).with_seed(1)).unwrap();
        assert_eq!(ex.store().len(), 50);
        assert!(Executor::populate(StoreConfig::new(1, 0)).is_err());
    }
}
