//! Feature parsing and CSV ingest.
//!
//! Every path into the scorer goes through `FeatureInput::parse`, which turns
//! raw text into a typed `FeatureRecord` or a validation error. Nothing that
//! fails to parse is ever coerced to `NaN` or zero.
//!
//! Design goals for file ingest:
//! - **Strict schema** for the six feature columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (rows keep their file order)

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::FeatureRecord;
use crate::error::{AppError, CoreError};

/// Feature column names, in export order.
pub const FEATURE_FIELDS: [&str; 6] = [
    "age",
    "gender",
    "policy",
    "vehicle_age",
    "previous_claims",
    "annual_premium",
];

/// Unparsed feature values as typed by a user or read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureInput {
    pub age: String,
    pub gender: String,
    pub policy: String,
    pub vehicle_age: String,
    pub previous_claims: String,
    pub annual_premium: String,
}

impl FeatureInput {
    /// Validate every field and build a typed record.
    ///
    /// Integer fields accept whole numbers written with a decimal point
    /// (`30.0`), but reject fractions, negatives and non-finite values.
    pub fn parse(&self) -> Result<FeatureRecord, CoreError> {
        Ok(FeatureRecord {
            age: parse_whole("age", &self.age, f64::from(u32::MAX))? as u32,
            gender: parse_whole("gender", &self.gender, f64::from(u8::MAX))? as u8,
            policy: parse_whole("policy", &self.policy, f64::from(u8::MAX))? as u8,
            vehicle_age: parse_whole("vehicle_age", &self.vehicle_age, f64::from(u32::MAX))? as u32,
            previous_claims: parse_whole("previous_claims", &self.previous_claims, f64::from(u32::MAX))?
                as u32,
            annual_premium: parse_amount("annual_premium", &self.annual_premium)?,
        })
    }

    /// Mutable access by column name (used by form-style front-ends).
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "age" => Some(&mut self.age),
            "gender" => Some(&mut self.gender),
            "policy" => Some(&mut self.policy),
            "vehicle_age" => Some(&mut self.vehicle_age),
            "previous_claims" => Some(&mut self.previous_claims),
            "annual_premium" => Some(&mut self.annual_premium),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "age" => Some(&self.age),
            "gender" => Some(&self.gender),
            "policy" => Some(&self.policy),
            "vehicle_age" => Some(&self.vehicle_age),
            "previous_claims" => Some(&self.previous_claims),
            "annual_premium" => Some(&self.annual_premium),
            _ => None,
        }
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, CoreError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(CoreError::validation(field, "missing value"));
    }
    let v: f64 = s
        .parse()
        .map_err(|_| CoreError::validation(field, format!("'{s}' is not a number")))?;
    if !v.is_finite() {
        return Err(CoreError::validation(field, format!("'{s}' is not a finite number")));
    }
    if v < 0.0 {
        return Err(CoreError::validation(field, format!("{s} must not be negative")));
    }
    // `-0` passes the sign check; store it as plain zero.
    Ok(if v == 0.0 { 0.0 } else { v })
}

fn parse_whole(field: &'static str, raw: &str, max: f64) -> Result<f64, CoreError> {
    let v = parse_number(field, raw)?;
    if v.fract() != 0.0 {
        return Err(CoreError::validation(field, format!("{} must be a whole number", raw.trim())));
    }
    if v > max {
        return Err(CoreError::validation(field, format!("{} is too large", raw.trim())));
    }
    Ok(v)
}

fn parse_amount(field: &'static str, raw: &str) -> Result<f64, CoreError> {
    parse_number(field, raw)
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed records in file order + row errors.
#[derive(Debug, Clone)]
pub struct IngestedRecords {
    pub records: Vec<FeatureRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load feature records from a CSV file with the six feature columns.
///
/// Extra columns (including a `prob` column from a previous export) are ignored.
pub fn load_feature_records(path: &Path) -> Result<IngestedRecords, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line: e.position().map_or(0, |p| p.line() as usize),
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match row_input(&record, &header_map).parse() {
            Ok(features) => records.push(features),
            Err(e) => row_errors.push(RowError {
                // Blank lines and multi-line quoted fields make the record index drift.
                line: record.position().map_or(0, |p| p.line() as usize),
                message: e.to_string(),
            }),
        }
    }

    for err in &row_errors {
        tracing::warn!(line = err.line, "skipped row: {}", err.message);
    }

    if records.is_empty() {
        return Err(AppError::new(3, format!("No valid rows in '{}'.", path.display())));
    }

    Ok(IngestedRecords {
        records,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = FEATURE_FIELDS
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            2,
            format!("Missing required column(s): {}", missing.join(", ")),
        ))
    }
}

fn row_input(record: &StringRecord, header_map: &HashMap<String, usize>) -> FeatureInput {
    let mut input = FeatureInput::default();
    for name in FEATURE_FIELDS {
        if let (Some(value), Some(slot)) = (get_optional(record, header_map, name), input.field_mut(name)) {
            *slot = value.to_string();
        }
    }
    input
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(values: [&str; 6]) -> FeatureInput {
        FeatureInput {
            age: values[0].to_string(),
            gender: values[1].to_string(),
            policy: values[2].to_string(),
            vehicle_age: values[3].to_string(),
            previous_claims: values[4].to_string(),
            annual_premium: values[5].to_string(),
        }
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("claim_odds_{name}_{}.csv", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_valid_input() {
        let f = input(["30", "1", "1", "5", "2", " 10000 "]).parse().unwrap();
        assert_eq!(
            f,
            FeatureRecord {
                age: 30,
                gender: 1,
                policy: 1,
                vehicle_age: 5,
                previous_claims: 2,
                annual_premium: 10_000.0,
            }
        );

        let f = input(["30.0", "0", "2", "0", "0", "99.5"]).parse().unwrap();
        assert_eq!(f.age, 30);
        assert_eq!(f.annual_premium, 99.5);
    }

    #[test]
    fn rejects_missing_and_non_numeric_values() {
        let err = input(["", "1", "1", "5", "2", "100"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "age", .. }));

        let err = input(["30", "1", "1", "five", "2", "100"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "vehicle_age", .. }));

        let err = input(["30", "1", "1", "5", "2", "NaN"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "annual_premium", .. }));
    }

    #[test]
    fn rejects_negative_and_fractional_counts() {
        let err = input(["30", "1", "1", "5", "-1", "100"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "previous_claims", .. }));

        let err = input(["30.5", "1", "1", "5", "1", "100"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "age", .. }));

        let err = input(["30", "1", "300", "5", "1", "100"]).parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "policy", .. }));
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let f = input(["30", "1", "1", "5", "2", "-0"]).parse().unwrap();
        assert!(f.annual_premium.is_sign_positive());

        let text = crate::io::serialize(&[crate::domain::ScoredRecord {
            features: f,
            probability: 0.5,
        }])
        .unwrap();
        assert_eq!(text.lines().nth(1), Some("30,1,1,5,2,0,0.5"));
    }

    #[test]
    fn unknown_policy_code_is_not_a_validation_error() {
        let f = input(["30", "1", "7", "5", "1", "100"]).parse().unwrap();
        assert_eq!(f.policy, 7);
    }

    #[test]
    fn load_skips_bad_rows_and_keeps_order() {
        let path = write_temp(
            "ingest",
            "\u{feff}Age,gender,policy,vehicle_age,previous_claims,annual_premium,prob\n\
             30,1,1,5,2,10000,0.71\n\
             x,1,1,5,2,10000,0.71\n\
             45,0,2,3,0,800,0.2\n",
        );
        let ingested = load_feature_records(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(ingested.rows_read, 3);
        assert_eq!(ingested.records.len(), 2);
        assert_eq!(ingested.records[0].age, 30);
        assert_eq!(ingested.records[1].age, 45);
        assert_eq!(ingested.row_errors.len(), 1);
        assert_eq!(ingested.row_errors[0].line, 3);
    }

    #[test]
    fn row_errors_report_file_lines_across_blank_lines() {
        let path = write_temp(
            "blank_lines",
            "age,gender,policy,vehicle_age,previous_claims,annual_premium\n\
             30,1,1,5,2,10000\n\
             \n\
             \n\
             x,1,1,5,2,10000\n",
        );
        let ingested = load_feature_records(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.row_errors.len(), 1);
        assert_eq!(ingested.row_errors[0].line, 5);
    }

    #[test]
    fn load_requires_feature_columns() {
        let path = write_temp("schema", "age,gender\n30,1\n");
        let err = load_feature_records(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("policy"));
    }

    #[test]
    fn load_with_no_valid_rows_fails() {
        let path = write_temp(
            "empty",
            "age,gender,policy,vehicle_age,previous_claims,annual_premium\n,,,,,\n",
        );
        let err = load_feature_records(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 3);
    }
}
