//! Best survival time
//!
//! Persisted as milliseconds in a decimal string. Absent or unreadable values
//! count as zero.

use super::{KeyValueStore, StorageError};
use crate::consts::BEST_TIME_KEY;

/// The longest run so far, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct BestTime {
    ms: f64,
}

impl BestTime {
    pub fn new(ms: f64) -> Self {
        Self {
            ms: sanitize(ms),
        }
    }

    pub fn ms(&self) -> f64 {
        self.ms
    }

    /// Parse a stored value. Anything that is not a finite, non-negative
    /// number reads as zero.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(ms) => Self::new(ms),
            Err(_) => {
                log::warn!("Stored best time {:?} is not a number, using 0", raw);
                Self::default()
            }
        }
    }

    /// Read the best time from the store
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        Ok(store
            .get(BEST_TIME_KEY)?
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default())
    }

    /// Read the best time, treating any storage failure as "no record"
    pub fn load_or_default(store: &dyn KeyValueStore) -> Self {
        Self::load(store).unwrap_or_else(|e| {
            log::warn!("Could not read best time: {}", e);
            Self::default()
        })
    }

    /// Write the best time to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(BEST_TIME_KEY, &self.ms.to_string())
    }

    /// Raise the record to `elapsed_ms` if it is longer. Returns true when the
    /// record changed; ties keep the old record.
    pub fn offer(&mut self, elapsed_ms: f64) -> bool {
        let elapsed_ms = sanitize(elapsed_ms);
        if elapsed_ms > self.ms {
            self.ms = elapsed_ms;
            true
        } else {
            false
        }
    }
}

fn sanitize(ms: f64) -> f64 {
    if ms.is_finite() && ms > 0.0 { ms } else { 0.0 }
}
