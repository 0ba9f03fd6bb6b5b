//! Reporting utilities: verdict lines, record tables and ingest summaries.

pub mod format;

pub use format::*;
