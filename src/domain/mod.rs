//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - policyholder features (`FeatureRecord`) and table rows (`ScoredRecord`)
//! - categorical helpers (`PolicyTier`, `gender_label`, `Verdict`)
//! - resolved session settings (`SessionConfig`)

pub mod types;

pub use types::*;
