//! Error types.
//!
//! - `CoreError`: failures of the scoring/table core (validation, bad row index,
//!   empty export). Returned to the immediate caller, never fatal.
//! - `AppError`: the single error that crosses the binary boundary, carrying the
//!   process exit code.

use thiserror::Error;

/// Errors produced by the scoring/table core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A feature value is missing or cannot be read as the number it must be.
    #[error("Invalid `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// `remove_at` was called with a position outside the table.
    #[error("Row {index} is out of range (table has {len} rows).")]
    IndexOutOfRange { index: usize, len: usize },

    /// Serialization was requested for an empty table.
    #[error("No data!")]
    EmptyInput,
}

impl CoreError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let exit_code = match err {
            CoreError::Validation { .. } | CoreError::IndexOutOfRange { .. } => 2,
            CoreError::EmptyInput => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let e: AppError = CoreError::validation("age", "missing value").into();
        assert_eq!(e.exit_code(), 2);
        assert_eq!(e.to_string(), "Invalid `age`: missing value");

        let e: AppError = CoreError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(e.exit_code(), 2);

        let e: AppError = CoreError::EmptyInput.into();
        assert_eq!(e.exit_code(), 3);
        assert_eq!(e.to_string(), "No data!");
    }
}
