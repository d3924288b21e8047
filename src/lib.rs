//! SeqDB: a networked, in-memory, positional record store.
//!
//! The store is one ordered sequence of `i32` values behind one
//! reader/writer lock, with four operations:
//!
//! - **Search**: every `(index, value)` holding a value, in index order
//! - **Add**: append values
//! - **Update**: overwrite positions, all-or-nothing
//! - **Delete**: remove positions, all-or-nothing, positions taken from the
//!   start of the call
//!
//! Indices are positions, not identifiers. Any insertion or deletion ahead
//! of a position changes it.
//!
//! # Example
//!
//! ```
//! use seqdb::{open_in_memory, Record};
//!
//! let db = open_in_memory(vec![5, 3, 5, 7]);
//! assert_eq!(db.search(5).unwrap(), vec![Record::new(0, 5), Record::new(2, 5)]);
//!
//! db.delete(vec![0, 2]).unwrap();
//! assert_eq!(db.search(7).unwrap(), vec![Record::new(1, 7)]);
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

/// Open an in-process store holding `values`
///
/// The values were not generated, so [`StoreInfo::modulus`] is `None`.
pub fn open_in_memory(values: Vec<i32>) -> SeqDb {
    let store = Arc::new(RecordStore::from_values(values));
    SeqDb::new(Executor::from_store(store))
}

/// Open an in-process store pre-populated per `config`
pub fn open_populated(config: StoreConfig) -> Result<SeqDb, StoreConfigError> {
    Ok(SeqDb::new(Executor::populate(config)?))
}
