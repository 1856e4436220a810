//! phishscore library: phishing risk scoring for URLs
//!
//! This library scores URLs by fusing up to three classifier probabilities
//! with a static domain-trust evaluation, structural URL features and a small
//! rule table. It provides:
//!
//! - [`FeatureExtractor`]: lexical and structural URL features, plus the
//!   frozen 12-element vector consumed by the tree model
//! - [`DomainTrustEvaluator`]: reputation scoring from reference tables and
//!   suspicious-pattern detection
//! - [`EnsemblePredictor`]: weighted fusion, trust dampening, rule overrides,
//!   confidence and risk tier
//!
//! Classifiers are plugged in through the [`PhishingModel`] trait. With no
//! model available the predictor falls back to `1 - trust_score`, so it
//! always answers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use phishscore::{
//!     EnsemblePredictor, ModelSource, PredictorConfig, ReferenceData, RemoteModel,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = phishscore::initialization::init_client(std::time::Duration::from_secs(10))?;
//! let electra = RemoteModel::new(
//!     ModelSource::Electra,
//!     "http://localhost:8001/predict".parse()?,
//!     client,
//! );
//!
//! let predictor = EnsemblePredictor::new(PredictorConfig::default(), ReferenceData::default())?
//!     .with_model(Arc::new(electra));
//!
//! let prediction = predictor.predict("http://paypal.secure-login.tk/verify").await;
//! println!("{} -> {} ({})", prediction.url, prediction.status, prediction.phishing_probability);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Prediction is async and requires a Tokio runtime (model calls are bounded
//! with `tokio::time::timeout`). Feature extraction and trust evaluation are
//! synchronous.

#![warn(missing_docs)]

pub mod config;
pub mod domain;
pub mod ensemble;
pub mod error_handling;
pub mod features;
pub mod initialization;
pub mod intel;
pub mod models;
pub mod trust;

// Re-export public API
pub use config::{LogFormat, LogLevel, PredictorConfig, ReferenceData};
pub use ensemble::{
    EnsemblePrediction, EnsemblePredictor, ModelPrediction, ModelStatus, PredictionStatus,
    RiskLevel, RuleFlag, RuleOverride,
};
pub use error_handling::{ConfigError, ModelError};
pub use features::{FeatureExtractor, UrlFeatures};
pub use models::{ModelOutcome, ModelSource, PayloadMode, PhishingModel, RemoteModel};
pub use trust::{DomainTrustEvaluator, SuspiciousPattern, TrustEvaluation, TrustLevel};
