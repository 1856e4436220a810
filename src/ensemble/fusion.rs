//! Probability fusion and confidence arithmetic.

use crate::config::{
    PATTERN_BOOST_CAP, PATTERN_BOOST_PER_HIT, TRUST_DAMPENING_FACTOR, WHITELIST_DAMPENING,
};
use crate::error_handling::ConfigError;
use crate::models::ModelSource;

/// Model weights normalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelWeights {
    /// Transformer encoder weight
    pub electra: f64,
    /// Character-level model weight
    pub biformer: f64,
    /// Tree model weight
    pub lgbm: f64,
}

impl ModelWeights {
    /// Validates raw weights and normalizes them.
    ///
    /// # Errors
    ///
    /// `InvalidWeight` for a negative or non-finite weight, `NoModelWeight`
    /// when they sum to zero.
    pub fn normalized(electra: f64, biformer: f64, lgbm: f64) -> Result<Self, ConfigError> {
        for (slot, value) in [
            (ModelSource::Electra, electra),
            (ModelSource::Biformer, biformer),
            (ModelSource::Lgbm, lgbm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    slot: slot.as_str(),
                    value,
                });
            }
        }

        let total = electra + biformer + lgbm;
        if total <= 0.0 || !total.is_finite() {
            return Err(ConfigError::NoModelWeight);
        }

        Ok(Self {
            electra: electra / total,
            biformer: biformer / total,
            lgbm: lgbm / total,
        })
    }

    /// Weight of one slot.
    pub fn for_source(&self, source: ModelSource) -> f64 {
        match source {
            ModelSource::Electra => self.electra,
            ModelSource::Biformer => self.biformer,
            ModelSource::Lgbm => self.lgbm,
        }
    }
}

/// Weighted mean over the models that answered, re-normalized over their weights.
///
/// `None` when nothing answered or the answering models carry no weight.
pub(super) fn weighted_average(scores: &[(ModelSource, f64)], weights: &ModelWeights) -> Option<f64> {
    let (weighted_sum, total_weight) =
        scores
            .iter()
            .fold((0.0, 0.0), |(sum, total), (source, probability)| {
                let weight = weights.for_source(*source);
                (sum + probability * weight, total + weight)
            });
    (total_weight > 0.0).then(|| weighted_sum / total_weight)
}

/// Dampens a probability by domain trust, and further when whitelisted.
pub(super) fn apply_trust_adjustment(probability: f64, trust_score: f64, whitelisted: bool) -> f64 {
    let dampened = probability * (1.0 - trust_score * TRUST_DAMPENING_FACTOR);
    if whitelisted {
        dampened * WHITELIST_DAMPENING
    } else {
        dampened
    }
}

/// Pushes a probability toward 1 by a capped fraction per suspicious pattern.
pub(super) fn apply_pattern_boost(probability: f64, pattern_count: usize) -> f64 {
    if pattern_count == 0 {
        return probability;
    }
    let boost = (pattern_count as f64 * PATTERN_BOOST_PER_HIT).min(PATTERN_BOOST_CAP);
    probability + (1.0 - probability) * boost
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Confidence of the final probability.
///
/// Falls back to the trust confidence when no model answered. Otherwise mixes
/// distance from 0.5, agreement between models and trust confidence.
pub(super) fn confidence(probability: f64, model_probabilities: &[f64], trust_confidence: f64) -> f64 {
    if model_probabilities.is_empty() {
        return trust_confidence;
    }

    let certainty = (probability - 0.5).abs() * 2.0;
    let agreement = if model_probabilities.len() > 1 {
        1.0 - (std_dev(model_probabilities) * 2.0).min(0.5)
    } else {
        0.8
    };
    let trust_term = trust_confidence * 0.3;

    (certainty * 0.5 + agreement * 0.3 + trust_term).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_weights_normalized() {
        let weights = ModelWeights::normalized(2.0, 1.0, 1.0).unwrap();
        assert!(approx(weights.electra, 0.5));
        assert!(approx(weights.biformer, 0.25));
        assert!(approx(weights.lgbm, 0.25));
        assert!(approx(weights.for_source(ModelSource::Lgbm), 0.25));
    }

    #[test]
    fn test_weights_rejected() {
        assert!(matches!(
            ModelWeights::normalized(0.0, 0.0, 0.0),
            Err(ConfigError::NoModelWeight)
        ));
        assert!(matches!(
            ModelWeights::normalized(0.4, -0.1, 0.2),
            Err(ConfigError::InvalidWeight { slot: "biformer", .. })
        ));
        assert!(ModelWeights::normalized(f64::NAN, 0.3, 0.3).is_err());
    }

    #[test]
    fn test_weighted_average_renormalizes_over_answering_models() {
        let weights = ModelWeights::normalized(0.40, 0.35, 0.25).unwrap();
        let fused = weighted_average(
            &[(ModelSource::Electra, 0.8), (ModelSource::Lgbm, 0.2)],
            &weights,
        )
        .unwrap();
        // (0.8 * 0.40 + 0.2 * 0.25) / 0.65
        assert!(approx(fused, 0.37 / 0.65));
    }

    #[test]
    fn test_weighted_average_without_weight_is_none() {
        let weights = ModelWeights::normalized(1.0, 0.0, 0.0).unwrap();
        assert_eq!(weighted_average(&[], &weights), None);
        assert_eq!(
            weighted_average(&[(ModelSource::Lgbm, 0.9)], &weights),
            None
        );
    }

    #[test]
    fn test_trust_adjustment() {
        assert!(approx(apply_trust_adjustment(0.5, 1.0, false), 0.35));
        assert!(approx(apply_trust_adjustment(0.5, 1.0, true), 0.035));
        assert!(approx(apply_trust_adjustment(0.5, 0.0, false), 0.5));
    }

    #[test]
    fn test_pattern_boost_is_capped() {
        assert_eq!(apply_pattern_boost(0.4, 0), 0.4);
        assert!(approx(apply_pattern_boost(0.5, 1), 0.55));
        assert!(approx(apply_pattern_boost(0.5, 10), 0.65));
        assert!(apply_pattern_boost(1.0, 3) <= 1.0);
    }

    #[test]
    fn test_confidence_without_models_uses_trust() {
        assert_eq!(confidence(0.9, &[], 0.42), 0.42);
    }

    #[test]
    fn test_confidence_single_model() {
        // certainty 0.8, fixed agreement 0.8, trust 0.5
        let value = confidence(0.9, &[0.9], 0.5);
        assert!(approx(value, 0.8 * 0.5 + 0.8 * 0.3 + 0.15));
    }

    #[test]
    fn test_confidence_uses_population_std_dev() {
        // std dev of [0.2, 0.8] is 0.3, so agreement = 1 - 0.5 (capped)
        let value = confidence(0.5, &[0.2, 0.8], 1.0);
        assert!(approx(value, 0.5 * 0.3 + 0.3));

        // std dev of [0.4, 0.6] is 0.1, agreement = 0.8
        let value = confidence(0.5, &[0.4, 0.6], 0.0);
        assert!(approx(value, 0.8 * 0.3));
    }
}
