//! Classifier model providers.
//!
//! The ensemble treats every classifier as an opaque asynchronous function
//! from a URL to a phishing probability. Each provider implements
//! [`PhishingModel`]; the predictor wraps every call with [`query_model`],
//! which enforces the timeout and the [0, 1] range and turns any failure
//! into [`ModelOutcome::Unavailable`].

mod remote;

use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error_handling::ModelError;

pub use remote::{PayloadMode, RemoteModel};

/// The three ensemble slots.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModelSource {
    /// Transformer text encoder over the raw URL
    Electra,
    /// Character-level URL model
    Biformer,
    /// Gradient-boosted trees over the numeric feature vector
    Lgbm,
}

impl ModelSource {
    /// Lowercase slot name.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A classifier that scores a URL.
///
/// Implementations must be shareable across tasks; the predictor queries all
/// of its models concurrently.
pub trait PhishingModel: Send + Sync {
    /// Ensemble slot this model fills.
    fn source(&self) -> ModelSource;

    /// Whether the model is loaded and configured. Unavailable models are
    /// skipped without being queried.
    fn is_available(&self) -> bool {
        true
    }

    /// Probability that `url` is phishing, in [0, 1].
    fn phishing_probability<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<f64, ModelError>>;
}

/// Result of querying one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModelOutcome {
    /// The model answered with a valid probability
    Success {
        /// Probability in [0, 1]
        probability: f64,
    },
    /// The model was skipped, failed, or timed out
    Unavailable {
        /// Why the model has no answer
        reason: String,
    },
}

impl ModelOutcome {
    /// The probability, when the model answered.
    pub fn probability(&self) -> Option<f64> {
        match self {
            ModelOutcome::Success { probability } => Some(*probability),
            ModelOutcome::Unavailable { .. } => None,
        }
    }
}

/// Checks that a model output is a usable probability.
///
/// NaN, infinities and values outside [0, 1] are rejected rather than clamped.
pub fn validate_probability(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ModelError::OutOfRange(value))
    }
}

/// Queries one model with a timeout.
///
/// Never fails: unavailable models, errors, timeouts and out-of-range outputs
/// all become [`ModelOutcome::Unavailable`] and are logged at `warn`.
pub async fn query_model(model: &dyn PhishingModel, url: &str, timeout: Duration) -> ModelOutcome {
    let source = model.source();
    if !model.is_available() {
        log::debug!("Skipping {} model: not available", source);
        return ModelOutcome::Unavailable {
            reason: ModelError::Unavailable.to_string(),
        };
    }

    let result = match tokio::time::timeout(timeout, model.phishing_probability(url)).await {
        Ok(result) => result.and_then(validate_probability),
        Err(_) => Err(ModelError::Timeout(timeout)),
    };

    match result {
        Ok(probability) => {
            log::trace!("{} model scored {}: {}", source, url, probability);
            ModelOutcome::Success { probability }
        }
        Err(e) => {
            log::warn!("{} model failed for {}: {}", source, url, e);
            ModelOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
