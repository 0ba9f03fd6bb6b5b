//! Input/output helpers.
//!
//! - feature parsing + CSV ingest (`ingest`)
//! - record table export (`export`)
//! - coefficients JSON (`coefficients`)

pub mod coefficients;
pub mod export;
pub mod ingest;

pub use coefficients::*;
pub use export::*;
pub use ingest::*;
