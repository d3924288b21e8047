//! In-memory record storage for SeqDB
//!
//! One ordered `Vec<i32>` behind one reader/writer lock. See
//! [`RecordStore`] for the operations and their locking contract.

pub mod record_store;

pub use record_store::RecordStore;
