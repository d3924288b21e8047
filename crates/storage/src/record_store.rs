//! Positional record store
//!
//! One store is constructed at startup, wrapped in `Arc`, and shared by
//! every connection the transport accepts.
//!
//! # Design
//!
//! - Vec<i32>: contiguous, index-addressable, duplicates allowed
//! - parking_lot::RwLock: many concurrent readers or exactly one writer
//! - Scoped guards: the lock is released on every exit path, errors included
//!
//! # Locking Contract
//!
//! | Operation | Lock | Held for |
//! |-----------|------|----------|
//! | `search` | shared | the full scan |
//! | `add` | exclusive | the full append |
//! | `update` | exclusive | validation plus every write |
//! | `delete` | exclusive | validation plus every removal |
//!
//! # Failure Policy
//!
//! `update` and `delete` are all-or-nothing. Every index is checked against
//! the length at the start of the call before anything is written, so a
//! rejected call leaves the sequence exactly as it found it.

use std::fmt;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqdb_core::{Record, StoreConfig, StoreConfigError, StoreError, StoreResult, MAX_RECORDS};
use tracing::{debug, info, warn};

/// Concurrent ordered store of `i32` values
///
/// # Thread Safety
///
/// All operations take `&self` and are safe to call from many threads.
/// Searches run concurrently with each other; mutations are serialized and
/// exclude searches while they run. Two mutations issued at the same time
/// take effect in lock-arrival order.
///
/// # Example
///
/// ```
/// use seqdb_core::Record;
/// use seqdb_storage::RecordStore;
///
/// let store = RecordStore::from_values(vec![5, 3, 5, 7]);
/// assert_eq!(store.search(5), vec![Record::new(0, 5), Record::new(2, 5)]);
///
/// store.delete(&[0, 2]).unwrap();
/// assert_eq!(store.snapshot(), vec![3, 7]);
/// ```
pub struct RecordStore {
    values: RwLock<Vec<i32>>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_values(Vec::new())
    }

    /// Create a store holding `values` in order
    ///
    /// Panics if `values` holds more than [`MAX_RECORDS`] elements.
    pub fn from_values(values: Vec<i32>) -> Self {
        assert!(
            values.len() <= MAX_RECORDS,
            "record store limited to {} values",
            MAX_RECORDS
        );
        Self {
            values: RwLock::new(values),
        }
    }

    /// Create a store pre-populated per `config`
    ///
    /// Values are drawn uniformly from `[0, config.modulus)`. A configured
    /// seed makes the contents reproducible.
    pub fn populate(config: &StoreConfig) -> Result<Self, StoreConfigError> {
        config.validate()?;

        let values = match config.seed {
            Some(seed) => generate(
                &mut StdRng::seed_from_u64(seed),
                config.initial_records,
                config.modulus,
            ),
            None => generate(
                &mut StdRng::from_entropy(),
                config.initial_records,
                config.modulus,
            ),
        };

        info!(
            records = config.initial_records,
            modulus = config.modulus,
            seeded = config.seed.is_some(),
            "record store populated"
        );
        Ok(Self::from_values(values))
    }

    /// Number of values currently stored
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// True if the store holds no values
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Copy of the current sequence
    pub fn snapshot(&self) -> Vec<i32> {
        self.values.read().clone()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Find every position holding `query`
    ///
    /// Takes the shared lock for one full scan. Results are in ascending
    /// index order; no match yields an empty vector.
    pub fn search(&self, query: i32) -> Vec<Record> {
        let values = self.values.read();
        let records: Vec<Record> = values
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == query)
            // len <= MAX_RECORDS, so every position fits in i32
            .map(|(index, &value)| Record::new(index as i32, value))
            .collect();

        debug!(query, scanned = values.len(), matches = records.len(), "search");
        records
    }

    /// Append `new_values` to the end of the sequence, preserving their order
    ///
    /// The appended values occupy `[len, len + new_values.len())`. An empty
    /// slice is a no-op.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` if the result would exceed [`MAX_RECORDS`]. Nothing
    /// is appended in that case.
    pub fn add(&self, new_values: &[i32]) -> StoreResult<()> {
        if new_values.is_empty() {
            return Ok(());
        }

        let mut values = self.values.write();
        let current = values.len();
        if new_values.len() > MAX_RECORDS - current {
            warn!(current, requested = new_values.len(), "add rejected");
            return Err(StoreError::CapacityExceeded {
                current,
                requested: new_values.len(),
                limit: MAX_RECORDS,
            });
        }

        values.extend_from_slice(new_values);
        debug!(appended = new_values.len(), len = values.len(), "add");
        Ok(())
    }

    /// Overwrite `values[record.index] = record.value` for each record
    ///
    /// Writes are applied in input order while holding the exclusive lock,
    /// so when an index repeats the last record wins.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for the first index outside `[0, len)`. The store is
    /// left unchanged.
    pub fn update(&self, records: &[Record]) -> StoreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut values = self.values.write();
        let len = values.len();
        for record in records {
            if let Err(err) = checked_index(record.index, len) {
                warn!(index = record.index, len, "update rejected");
                return Err(err);
            }
        }

        for record in records {
            values[record.index as usize] = record.value;
        }
        debug!(updated = records.len(), "update");
        Ok(())
    }

    /// Remove the values at `indexes`
    ///
    /// Indexes name positions in the sequence as it was when the call
    /// started. The effect equals removing them one by one in descending
    /// order, so no removal shifts a later target. A repeated index removes
    /// one value.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for the first index outside `[0, len)`. Nothing is
    /// removed in that case.
    pub fn delete(&self, indexes: &[i32]) -> StoreResult<()> {
        if indexes.is_empty() {
            return Ok(());
        }

        let mut values = self.values.write();
        let len = values.len();
        let mut positions = Vec::with_capacity(indexes.len());
        for &index in indexes {
            match checked_index(index, len) {
                Ok(position) => positions.push(position),
                Err(err) => {
                    warn!(index, len, "delete rejected");
                    return Err(err);
                }
            }
        }
        positions.sort_unstable();
        positions.dedup();

        // positions is sorted, so one compaction pass removes them all
        let mut next = positions.iter().peekable();
        let mut position = 0;
        values.retain(|_| {
            let doomed = next.next_if_eq(&&position).is_some();
            position += 1;
            !doomed
        });

        debug!(removed = positions.len(), len = values.len(), "delete");
        Ok(())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("len", &self.len())
            .finish()
    }
}

/// Map a caller-supplied index onto `[0, len)`
fn checked_index(index: i32, len: usize) -> StoreResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&position| position < len)
        .ok_or_else(|| StoreError::out_of_range(index, len))
}

fn generate<R: Rng>(rng: &mut R, count: usize, modulus: i32) -> Vec<i32> {
    (0..count).map(|_| rng.gen_range(0..modulus)).collect()
}
