//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - scored in-memory
//! - held in the record table
//! - printed as JSON by the CLI

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ModelCoefficients;

/// Default filename used when exporting the record table.
pub const DEFAULT_EXPORT_FILE: &str = "insurance_data.csv";

/// One policyholder observation.
///
/// Categorical fields are kept as their raw codes. Domain checks are a display
/// concern: an unknown `policy` code simply contributes no tier adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: u32,
    /// 0 = female, 1 = male.
    pub gender: u8,
    /// See [`PolicyTier`].
    pub policy: u8,
    pub vehicle_age: u32,
    pub previous_claims: u32,
    pub annual_premium: f64,
}

/// A feature record plus its predicted claim probability, as held in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub features: FeatureRecord,
    pub probability: f64,
}

/// Policy tier behind the `policy` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyTier {
    Basic,
    Premium,
    Gold,
}

impl PolicyTier {
    pub const ALL: [PolicyTier; 3] = [PolicyTier::Basic, PolicyTier::Premium, PolicyTier::Gold];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PolicyTier::Basic),
            1 => Some(PolicyTier::Premium),
            2 => Some(PolicyTier::Gold),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            PolicyTier::Basic => 0,
            PolicyTier::Premium => 1,
            PolicyTier::Gold => 2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PolicyTier::Basic => "Basic",
            PolicyTier::Premium => "Premium",
            PolicyTier::Gold => "Gold",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PolicyTier::Basic => PolicyTier::Premium,
            PolicyTier::Premium => PolicyTier::Gold,
            PolicyTier::Gold => PolicyTier::Basic,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PolicyTier::Basic => PolicyTier::Gold,
            PolicyTier::Premium => PolicyTier::Basic,
            PolicyTier::Gold => PolicyTier::Premium,
        }
    }
}

/// Short label for a gender code (`1` is `M`, anything else `F`).
pub fn gender_label(code: u8) -> &'static str {
    if code == 1 { "M" } else { "F" }
}

/// Display name for a policy code, `?` for codes outside the known tiers.
pub fn policy_label(code: u8) -> &'static str {
    PolicyTier::from_code(code).map_or("?", PolicyTier::display_name)
}

/// Binary reading of a probability, thresholded at 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Likely,
    Unlikely,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.5 {
            Verdict::Likely
        } else {
            Verdict::Unlikely
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Verdict::Likely => "Likely to Claim",
            Verdict::Unlikely => "Unlikely to Claim",
        }
    }
}

/// A single prediction, as reported by `claims predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub features: FeatureRecord,
    pub score: f64,
    pub probability: f64,
    pub verdict: Verdict,
}

/// Resolved settings for one session, built once from CLI arguments.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub coefficients: ModelCoefficients,
    pub export_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coefficients: ModelCoefficients::default(),
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}
