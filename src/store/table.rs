//! In-memory table of scored records.
//!
//! Rows are addressed by their current position. Positions are not stable ids:
//! removing row `i` shifts every later row down by one, so front-ends must
//! re-render the whole table after each mutation.

use crate::domain::{FeatureRecord, ScoredRecord};
use crate::error::CoreError;

/// Ordered, insertion-ordered collection of scored records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    rows: Vec<ScoredRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with its probability at the end of the table.
    pub fn append(&mut self, features: FeatureRecord, probability: f64) {
        self.rows.push(ScoredRecord {
            features,
            probability,
        });
    }

    /// Remove the row at `index` and return it.
    ///
    /// Out-of-range positions leave the table untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<ScoredRecord, CoreError> {
        if index >= self.rows.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    pub fn all(&self) -> &[ScoredRecord] {
        &self.rows
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(age: u32) -> FeatureRecord {
        FeatureRecord {
            age,
            gender: 0,
            policy: 0,
            vehicle_age: 1,
            previous_claims: 0,
            annual_premium: 500.0,
        }
    }

    fn store_with(ages: &[u32]) -> RecordStore {
        let mut store = RecordStore::new();
        for &age in ages {
            store.append(features(age), f64::from(age) / 100.0);
        }
        store
    }

    fn ages(store: &RecordStore) -> Vec<u32> {
        store.all().iter().map(|r| r.features.age).collect()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let store = store_with(&[30, 40, 50]);
        assert_eq!(store.count(), 3);
        assert_eq!(ages(&store), vec![30, 40, 50]);
        assert_eq!(store.all()[1].probability, 0.4);
    }

    #[test]
    fn remove_at_shifts_later_rows() {
        let mut store = store_with(&[30, 40, 50, 60]);
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.features.age, 40);
        assert_eq!(ages(&store), vec![30, 50, 60]);

        store.remove_at(2).unwrap();
        assert_eq!(ages(&store), vec![30, 50]);
    }

    #[test]
    fn remove_out_of_range_is_an_error_and_changes_nothing() {
        let mut store = store_with(&[30, 40]);
        let before = store.clone();

        let err = store.remove_at(2).unwrap_err();
        assert_eq!(err, CoreError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(store, before);

        let mut empty = RecordStore::new();
        assert!(empty.remove_at(0).is_err());
    }

    #[test]
    fn reads_are_idempotent() {
        let store = store_with(&[21, 22]);
        assert_eq!(store.all(), store.all());
        assert_eq!(store.count(), store.count());
        assert!(!store.is_empty());
    }
}
