//! Fixed coefficients of the linear-logistic claim model.

use serde::{Deserialize, Serialize};

/// Intercept and per-feature weights of the claim model.
///
/// Built once at startup (defaults, optionally overridden from JSON) and never
/// mutated afterwards. Keys missing from a JSON file keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub age_coef: f64,
    pub gender_coef: f64,
    /// Added only when `policy == 1`.
    pub policy_premium_coef: f64,
    /// Added only when `policy == 2`.
    pub policy_gold_coef: f64,
    pub prev_claims_coef: f64,
    pub vehicle_age_coef: f64,
    /// Weight on `annual_premium`, in currency units.
    pub premium_coef: f64,
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self {
            intercept: -3.0,
            age_coef: 0.03,
            gender_coef: 0.5,
            policy_premium_coef: 0.4,
            policy_gold_coef: 0.8,
            prev_claims_coef: 1.2,
            vehicle_age_coef: -0.1,
            premium_coef: 0.00002,
        }
    }
}

impl ModelCoefficients {
    /// Named view used for validation and reporting.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("intercept", self.intercept),
            ("age_coef", self.age_coef),
            ("gender_coef", self.gender_coef),
            ("policy_premium_coef", self.policy_premium_coef),
            ("policy_gold_coef", self.policy_gold_coef),
            ("prev_claims_coef", self.prev_claims_coef),
            ("vehicle_age_coef", self.vehicle_age_coef),
            ("premium_coef", self.premium_coef),
        ]
    }

    /// Ensure every coefficient is finite.
    pub fn validate(&self) -> Result<(), String> {
        match self.entries().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(format!("Coefficient `{name}` must be finite (got {v}).")),
            None => Ok(()),
        }
    }
}
