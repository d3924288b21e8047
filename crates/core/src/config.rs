//! Store pre-population settings
//!
//! The store is created once at startup and filled with `initial_records`
//! pseudo-random values drawn uniformly from `[0, modulus)`. A fixed `seed`
//! makes the initial contents reproducible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::MAX_RECORDS;

/// Default number of values created at startup
pub const DEFAULT_INITIAL_RECORDS: usize = 1_000_000;

/// Default upper bound (exclusive) for generated values
pub const DEFAULT_MODULUS: i32 = 100_000;

/// Invalid store settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreConfigError {
    /// Generated values are drawn from `[0, modulus)`, which is empty unless modulus > 0
    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(i32),

    /// More initial records than the index space can address
    #[error("initial_records {requested} exceeds limit {limit}")]
    TooManyRecords {
        /// Requested initial record count
        requested: usize,
        /// Maximum number of records
        limit: usize,
    },
}

/// Settings for the initial contents of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of values created at startup
    pub initial_records: usize,
    /// Exclusive upper bound for generated values
    pub modulus: i32,
    /// Seed for the value generator; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl StoreConfig {
    /// Create settings for `initial_records` values in `[0, modulus)`
    pub fn new(initial_records: usize, modulus: i32) -> Self {
        Self {
            initial_records,
            modulus,
            seed: None,
        }
    }

    /// Fix the generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the settings before building a store from them
    pub fn validate(&self) -> Result<(), StoreConfigError> {
        if self.modulus <= 0 {
            return Err(StoreConfigError::NonPositiveModulus(self.modulus));
        }
        if self.initial_records > MAX_RECORDS {
            return Err(StoreConfigError::TooManyRecords {
                requested: self.initial_records,
                limit: MAX_RECORDS,
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_RECORDS, DEFAULT_MODULUS)
    }
}
