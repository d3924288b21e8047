//! Typed in-process API over the executor.

use seqdb_core::Record;

use crate::{Command, Error, Executor, Output, Result, StoreInfo};

/// Typed handle for in-process callers
///
/// Each method builds a [`Command`], runs it through the executor, and
/// unwraps the expected [`Output`] variant.
#[derive(Debug, Clone)]
pub struct SeqDb {
    executor: Executor,
}

impl SeqDb {
    /// Wrap an executor
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// The underlying executor
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Ping the store.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }

    /// Get store size and settings.
    pub fn info(&self) -> Result<StoreInfo> {
        match self.executor.execute(Command::Info)? {
            Output::Info(info) => Ok(info),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Info".into(),
            }),
        }
    }

    /// Find every record holding `value`.
    pub fn search(&self, value: i32) -> Result<Vec<Record>> {
        match self.executor.execute(Command::Search { value })? {
            Output::Records { records } => Ok(records),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Search".into(),
            }),
        }
    }

    /// Append values.
    pub fn add(&self, values: Vec<i32>) -> Result<()> {
        self.expect_unit(Command::Add { values })
    }

    /// Overwrite positions.
    pub fn update(&self, records: Vec<Record>) -> Result<()> {
        self.expect_unit(Command::Update { records })
    }

    /// Remove positions.
    pub fn delete(&self, indexes: Vec<i32>) -> Result<()> {
        self.expect_unit(Command::Delete { indexes })
    }

    fn expect_unit(&self, cmd: Command) -> Result<()> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", name),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqdb_core::StoreConfig;
    use seqdb_storage::RecordStore;
    use std::sync::Arc;

    fn db(values: &[i32]) -> SeqDb {
        let store = Arc::new(RecordStore::from_values(values.to_vec()));
        SeqDb::new(Executor::new(store, StoreConfig::new(values.len(), 100)))
    }

    #[test]
    fn test_add_then_search() {
        let db = db(&[1, 2, 3]);
        db.add(vec![9, 9]).unwrap();
        assert_eq!(
            db.search(9).unwrap(),
            vec![Record::new(3, 9), Record::new(4, 9)]
        );
    }

    #[test]
    fn test_search_then_update_found() {
        let db = db(&[4, 1, 4]);
        let found = db.search(4).unwrap();
        let updated = found.iter().map(|r| Record::new(r.index, 0)).collect();
        db.update(updated).unwrap();
        assert_eq!(db.search(0).unwrap().len(), 2);
        assert!(db.search(4).unwrap().is_empty());
    }

    #[test]
    fn test_delete_found_records() {
        let db = db(&[5, 3, 5, 7]);
        let indexes = db.search(5).unwrap().iter().map(|r| r.index).collect();
        db.delete(indexes).unwrap();
        assert_eq!(db.executor().store().snapshot(), vec![3, 7]);
    }

    #[test]
    fn test_info() {
        let db = db(&[1, 2]);
        let info = db.info().unwrap();
        assert_eq!(info.len, 2);
        assert_eq!(info.modulus, Some(100));
    }

    #[test]
    fn test_ping() {
        assert_eq!(db(&[]).ping().unwrap(), env!("CARGO_PKG_VERSION"));
    }
}
