//! Ensemble fusion engine.
//!
//! Combines up to three classifier probabilities with the feature extractor
//! and the domain trust evaluator into one [`EnsemblePrediction`]:
//!
//! 1. Extract features, evaluate trust and check the whitelist
//! 2. Query every registered model concurrently, keeping the ones that answer
//! 3. Fuse by weighted mean (or fall back to `1 - trust_score` with no models)
//! 4. Dampen by trust, boost by suspicious patterns, clamp
//! 5. Run the rule table and apply its override
//! 6. Derive confidence, risk level and status
//!
//! A failing or slow model never fails a prediction; it is simply left out.

mod fusion;
mod rules;
mod types;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use strum::IntoEnumIterator;

use crate::config::{PredictorConfig, ReferenceData, OVERRIDE_MARGIN};
use crate::error_handling::ConfigError;
use crate::features::{round_to, FeatureExtractor};
use crate::models::{query_model, ModelSource, PhishingModel};
use crate::trust::DomainTrustEvaluator;

pub use fusion::ModelWeights;
pub use types::{
    EnsemblePrediction, ModelPrediction, ModelStatus, PredictionStatus, RiskLevel, RuleFlag,
    RuleOverride,
};

/// Fuses classifier outputs with domain trust and rule overrides.
///
/// Stateless after construction: predictions for different URLs can run
/// concurrently on a shared reference.
///
/// # Examples
///
/// ```
/// use phishscore::{EnsemblePredictor, PredictorConfig, ReferenceData};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let predictor =
///     EnsemblePredictor::new(PredictorConfig::default(), ReferenceData::default()).unwrap();
///
/// // No models registered: the rule-based fallback still answers
/// let prediction = rt.block_on(predictor.predict("http://192.168.1.1/login"));
/// assert!(prediction.is_phishing);
/// assert!(prediction.model_predictions.is_empty());
/// ```
pub struct EnsemblePredictor {
    config: PredictorConfig,
    weights: ModelWeights,
    extractor: FeatureExtractor,
    evaluator: DomainTrustEvaluator,
    models: BTreeMap<ModelSource, Arc<dyn PhishingModel>>,
}

impl std::fmt::Debug for EnsemblePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsemblePredictor")
            .field("config", &self.config)
            .field("weights", &self.weights)
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl EnsemblePredictor {
    /// Builds a predictor without any model registered.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a weight is negative or non-finite, the weights
    /// sum to zero, or the threshold is not strictly between 0 and 1.
    pub fn new(config: PredictorConfig, reference: ReferenceData) -> Result<Self, ConfigError> {
        let weights =
            ModelWeights::normalized(config.electra_weight, config.biformer_weight, config.lgbm_weight)?;
        if !config.threshold.is_finite() || config.threshold <= 0.0 || config.threshold >= 1.0 {
            return Err(ConfigError::InvalidThreshold(config.threshold));
        }

        log::info!(
            "Ensemble predictor initialized (weights: E={:.2}, B={:.2}, L={:.2}, threshold={})",
            weights.electra,
            weights.biformer,
            weights.lgbm,
            config.threshold
        );

        Ok(Self {
            extractor: FeatureExtractor::new(&reference),
            evaluator: DomainTrustEvaluator::new(reference),
            config,
            weights,
            models: BTreeMap::new(),
        })
    }

    /// Registers a model in its slot, replacing any model already there.
    pub fn with_model(mut self, model: Arc<dyn PhishingModel>) -> Self {
        let source = model.source();
        if self.models.insert(source, model).is_some() {
            log::warn!("Replacing previously registered {} model", source);
        }
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Normalized model weights.
    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    /// Feature extractor shared with predictions.
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Trust evaluator shared with predictions.
    pub fn evaluator(&self) -> &DomainTrustEvaluator {
        &self.evaluator
    }

    /// Availability of each ensemble slot, in slot order.
    pub fn model_status(&self) -> Vec<ModelStatus> {
        ModelSource::iter()
            .map(|source| {
                let model = self.models.get(&source);
                ModelStatus {
                    source,
                    configured: model.is_some(),
                    available: model.is_some_and(|m| m.is_available()),
                }
            })
            .collect()
    }

    /// Whether at least one registered model reports itself available.
    pub fn has_available_model(&self) -> bool {
        self.models.values().any(|m| m.is_available())
    }

    /// Scores one URL. Never fails.
    pub async fn predict(&self, url: &str) -> EnsemblePrediction {
        let features = self.extractor.extract(url);
        let trust = self.evaluator.evaluate(url);
        let (is_whitelisted, whitelist_reason) = self.evaluator.is_whitelisted(url);

        let scores = self.query_models(url).await;
        let threshold = self.config.threshold;
        let pattern_count = trust.suspicious_patterns.len();

        let mut probability = match fusion::weighted_average(&scores, &self.weights) {
            Some(fused) => {
                let mut p = fused;
                if self.config.enable_trust_adjustment {
                    p = fusion::apply_trust_adjustment(p, trust.trust_score, is_whitelisted);
                }
                fusion::apply_pattern_boost(p, pattern_count)
            }
            None => {
                log::debug!("No model scores for {}, using trust fallback", url);
                1.0 - trust.trust_score
            }
        }
        .clamp(0.0, 1.0);

        let verdict = if self.config.enable_rule_overrides {
            rules::evaluate_rules(&features, &trust)
        } else {
            rules::RuleVerdict::default()
        };

        let is_phishing = match verdict.override_decision {
            Some(RuleOverride::Safe) => {
                probability = probability.min(threshold - OVERRIDE_MARGIN);
                false
            }
            Some(RuleOverride::Phishing) => {
                probability = probability.max(threshold + OVERRIDE_MARGIN);
                true
            }
            None => probability >= threshold,
        };
        let probability = probability.clamp(0.0, 1.0);

        let model_probabilities: Vec<f64> = scores.iter().map(|(_, p)| *p).collect();
        let confidence = fusion::confidence(probability, &model_probabilities, trust.confidence);

        let status = if is_phishing {
            PredictionStatus::Phishing
        } else if probability > threshold * 0.5 {
            PredictionStatus::Suspicious
        } else {
            PredictionStatus::Safe
        };

        let slot_probability = |source: ModelSource| {
            scores
                .iter()
                .find(|(s, _)| *s == source)
                .map_or(0.0, |(_, p)| *p)
        };
        let model_predictions = scores
            .iter()
            .map(|&(source, probability)| {
                let weight = self.weights.for_source(source);
                ModelPrediction {
                    source,
                    probability,
                    weight,
                    weighted_contribution: probability * weight,
                }
            })
            .collect();

        log::debug!(
            "Prediction for {}: probability={:.6} phishing={} override={:?} flags={:?}",
            url,
            probability,
            is_phishing,
            verdict.override_decision,
            verdict.flags
        );

        EnsemblePrediction {
            url: url.to_string(),
            is_phishing,
            phishing_probability: round_to(probability, 6),
            confidence: round_to(confidence, 4),
            risk_level: RiskLevel::from_probability(probability),
            status,
            electra_probability: slot_probability(ModelSource::Electra),
            biformer_probability: slot_probability(ModelSource::Biformer),
            lgbm_probability: slot_probability(ModelSource::Lgbm),
            model_predictions,
            domain_trust_score: trust.trust_score,
            domain_trust_level: trust.trust_level,
            is_whitelisted,
            whitelist_reason,
            url_features: features,
            rule_flags: verdict.flags,
            rule_override: verdict.override_decision,
            threshold,
        }
    }

    /// Scores several URLs concurrently. Output order matches input order.
    pub async fn predict_batch<S: AsRef<str>>(&self, urls: &[S]) -> Vec<EnsemblePrediction> {
        join_all(urls.iter().map(|url| self.predict(url.as_ref()))).await
    }

    /// Verdict and probability only.
    pub async fn quick_predict(&self, url: &str) -> (bool, f64) {
        let prediction = self.predict(url).await;
        (prediction.is_phishing, prediction.phishing_probability)
    }

    /// Queries all registered models concurrently, keeping those that answer.
    async fn query_models(&self, url: &str) -> Vec<(ModelSource, f64)> {
        let timeout: Duration = self.config.model_timeout;
        let outcomes = join_all(self.models.iter().map(|(source, model)| async move {
            (*source, query_model(model.as_ref(), url, timeout).await)
        }))
        .await;

        outcomes
            .into_iter()
            .filter_map(|(source, outcome)| outcome.probability().map(|p| (source, p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
