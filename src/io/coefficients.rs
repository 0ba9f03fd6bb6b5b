//! Read model coefficients from JSON.
//!
//! The file is a flat object keyed by coefficient name (see
//! `models::ModelCoefficients`). Keys left out keep their compiled-in default.

use std::fs::File;
use std::path::Path;

use crate::error::AppError;
use crate::models::ModelCoefficients;

/// Read and validate a coefficients JSON file.
pub fn read_coefficients_json(path: &Path) -> Result<ModelCoefficients, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open coefficients JSON '{}': {e}", path.display())))?;
    let coefficients: ModelCoefficients = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid coefficients JSON '{}': {e}", path.display())))?;
    coefficients.validate().map_err(|msg| AppError::new(2, msg))?;
    Ok(coefficients)
}

/// Coefficients from `path` if given, otherwise the defaults.
pub fn resolve_coefficients(path: Option<&Path>) -> Result<ModelCoefficients, AppError> {
    match path {
        Some(path) => {
            let coefficients = read_coefficients_json(path)?;
            tracing::info!(path = %path.display(), "loaded model coefficients");
            Ok(coefficients)
        }
        None => Ok(ModelCoefficients::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("claim_odds_{name}_{}.json", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_overrides_from_file() {
        let path = write_temp("coef_ok", r#"{ "intercept": -1.0, "premium_coef": 0.0001 }"#);
        let c = read_coefficients_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(c.intercept, -1.0);
        assert_eq!(c.premium_coef, 0.0001);
        assert_eq!(c.gender_coef, ModelCoefficients::default().gender_coef);
    }

    #[test]
    fn rejects_malformed_json() {
        let path = write_temp("coef_bad", r#"{ "intercept": "high" }"#);
        let err = read_coefficients_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(resolve_coefficients(None).unwrap(), ModelCoefficients::default());
        let missing = std::env::temp_dir().join("claim_odds_definitely_missing.json");
        assert_eq!(resolve_coefficients(Some(&missing)).unwrap_err().exit_code(), 2);
    }
}
