//! The linear-logistic claim model.
//!
//! Coefficients are plain data; scoring is a small set of pure functions on top
//! of them so callers never touch the arithmetic directly.

pub mod coefficients;
pub mod scorer;

pub use coefficients::*;
pub use scorer::*;
