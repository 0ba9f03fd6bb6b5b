//! Linear scoring and probability estimation.
//!
//! The claim model has two primitive operations:
//! - compute the linear score of a feature record
//! - map that score to a probability through the logistic transform
//!
//! Both are pure; the `Scorer` only holds the coefficients it was built with.

use crate::domain::{FeatureRecord, Prediction, Verdict};
use crate::math::sigmoid;
use crate::models::ModelCoefficients;

/// Scores feature records with a fixed set of coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    coefficients: ModelCoefficients,
}

impl Scorer {
    pub fn new(coefficients: ModelCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &ModelCoefficients {
        &self.coefficients
    }

    /// Raw linear score (log-odds) of a record.
    ///
    /// Tier adjustments apply on exact match only, so `policy == 0` and any
    /// unknown code add nothing.
    pub fn score(&self, f: &FeatureRecord) -> f64 {
        let c = &self.coefficients;
        let mut s = c.intercept;
        s += c.age_coef * f64::from(f.age);
        s += c.gender_coef * f64::from(f.gender);
        if f.policy == 1 {
            s += c.policy_premium_coef;
        }
        if f.policy == 2 {
            s += c.policy_gold_coef;
        }
        s += c.prev_claims_coef * f64::from(f.previous_claims);
        s += c.vehicle_age_coef * f64::from(f.vehicle_age);
        s += c.premium_coef * f.annual_premium;
        s
    }

    /// Probability that the policyholder files a claim.
    pub fn predict_probability(&self, f: &FeatureRecord) -> f64 {
        sigmoid(self.score(f))
    }

    /// Score, probability and verdict in one go.
    pub fn predict(&self, f: &FeatureRecord) -> Prediction {
        let score = self.score(f);
        let probability = sigmoid(score);
        Prediction {
            features: *f,
            score,
            probability,
            verdict: Verdict::from_probability(probability),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ModelCoefficients::default())
    }
}
