//! Export the record table as CSV.
//!
//! Layout is fixed: the header below, then one line per row in table order.
//! All fields are numeric, so nothing is quoted. The probability is written as
//! its raw value (not rounded, not a percentage) so the file can be re-scored
//! or compared downstream.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ScoredRecord;
use crate::error::{AppError, CoreError};

/// Header line of the exported CSV.
pub const CSV_HEADER: &str = "age,gender,policy,vehicle_age,previous_claims,annual_premium,prob";

/// Render scored records as CSV text.
///
/// An empty slice is an error rather than a header-only file.
pub fn serialize(records: &[ScoredRecord]) -> Result<String, CoreError> {
    if records.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for r in records {
        let f = &r.features;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            f.age, f.gender, f.policy, f.vehicle_age, f.previous_claims, f.annual_premium, r.probability
        );
    }

    Ok(out)
}

/// Serialize `records` and write them to `path`. Returns the number of rows written.
pub fn write_records_csv(path: &Path, records: &[ScoredRecord]) -> Result<usize, AppError> {
    let text = serialize(records)?;

    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), rows = records.len(), "exported record table");
    Ok(records.len())
}
