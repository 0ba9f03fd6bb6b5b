//! Shared session logic used by both CLI and TUI front-ends.
//!
//! A `Session` owns the scorer and the record table, and exposes the user
//! actions as plain methods:
//! predict -> add -> delete -> export
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::{Path, PathBuf};

use crate::domain::{FeatureRecord, Prediction, ScoredRecord, SessionConfig};
use crate::error::{AppError, CoreError};
use crate::io::FeatureInput;
use crate::models::Scorer;
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct Session {
    scorer: Scorer,
    store: RecordStore,
    export_path: PathBuf,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            scorer: Scorer::new(config.coefficients),
            store: RecordStore::new(),
            export_path: config.export_path.clone(),
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Score a record without touching the table.
    pub fn predict(&self, features: &FeatureRecord) -> Prediction {
        self.scorer.predict(features)
    }

    /// Parse raw input, then predict.
    pub fn predict_input(&self, input: &FeatureInput) -> Result<Prediction, CoreError> {
        Ok(self.predict(&input.parse()?))
    }

    /// Score a record and append it to the table. Returns its probability.
    pub fn add(&mut self, features: FeatureRecord) -> f64 {
        let probability = self.scorer.predict_probability(&features);
        self.add_scored(features, probability);
        probability
    }

    /// Append a record whose probability was already computed by this session's scorer.
    pub(crate) fn add_scored(&mut self, features: FeatureRecord, probability: f64) {
        self.store.append(features, probability);
        tracing::debug!(probability, rows = self.store.count(), "added row");
    }

    /// Parse raw input, then add it to the table.
    pub fn add_input(&mut self, input: &FeatureInput) -> Result<f64, CoreError> {
        Ok(self.add(input.parse()?))
    }

    /// Delete the row at its current 0-based position.
    pub fn delete(&mut self, index: usize) -> Result<ScoredRecord, CoreError> {
        let removed = self.store.remove_at(index)?;
        tracing::debug!(index, rows = self.store.count(), "deleted row");
        Ok(removed)
    }

    pub fn records(&self) -> &[ScoredRecord] {
        self.store.all()
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// The table as CSV text.
    pub fn to_csv(&self) -> Result<String, CoreError> {
        crate::io::serialize(self.store.all())
    }

    /// Write the table to the configured export path.
    pub fn export(&self) -> Result<usize, AppError> {
        self.export_to(&self.export_path)
    }

    pub fn export_to(&self, path: &Path) -> Result<usize, AppError> {
        crate::io::write_records_csv(path, self.store.all())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
