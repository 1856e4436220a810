//! Ensemble prediction records.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::features::UrlFeatures;
use crate::models::ModelSource;
use crate::trust::TrustLevel;

/// Ordered risk tier of the final probability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    /// Probability below 0.1
    VeryLow,
    /// Probability in [0.1, 0.3)
    Low,
    /// Probability in [0.3, 0.6)
    Medium,
    /// Probability in [0.6, 0.85)
    High,
    /// Probability of 0.85 or more
    Critical,
}

impl RiskLevel {
    /// Maps a final phishing probability to its tier.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.1 {
            RiskLevel::VeryLow
        } else if probability < 0.3 {
            RiskLevel::Low
        } else if probability < 0.6 {
            RiskLevel::Medium
        } else if probability < 0.85 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// Three-way verdict shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PredictionStatus {
    /// Below half the threshold
    Safe,
    /// Not phishing, but above half the threshold
    Suspicious,
    /// Classified as phishing
    Phishing,
}

/// Hard decision from the rule table that supersedes the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleOverride {
    /// Force `is_phishing = false`
    Safe,
    /// Force `is_phishing = true`
    Phishing,
}

/// Tag of a rule that fired, reported in `rule_flags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleFlag {
    /// Trust level high/highest with score >= 0.85
    HighTrustDomain,
    /// Host is a literal IPv4 address
    IpAddressUrl,
    /// URL longer than 200 characters
    ExtremelyLongUrl,
    /// More than four subdomain labels
    ExcessiveSubdomains,
    /// Low trust with more than two suspicious patterns
    MultipleRiskIndicators,
    /// Government domain or suffix
    GovernmentDomain,
    /// Brand keyword in the subdomain only
    PotentialBrandImpersonation,
}

/// Contribution of one model that answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrediction {
    /// Slot that produced the probability
    pub source: ModelSource,
    /// Raw probability in [0, 1]
    pub probability: f64,
    /// Normalized configured weight
    pub weight: f64,
    /// `probability * weight`
    pub weighted_contribution: f64,
}

/// Final aggregate for one URL.
///
/// Built once per request and never mutated. Models that did not answer are
/// omitted from `model_predictions` and report 0.0 in their per-slot field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsemblePrediction {
    /// URL as submitted
    pub url: String,

    /// Final verdict
    pub is_phishing: bool,
    /// Final probability, rounded to 6 decimals
    pub phishing_probability: f64,
    /// Confidence, rounded to 4 decimals
    pub confidence: f64,
    /// Tier of the final probability
    pub risk_level: RiskLevel,
    /// Three-way verdict
    pub status: PredictionStatus,

    /// Transformer encoder probability (0.0 when absent)
    pub electra_probability: f64,
    /// Character-level model probability (0.0 when absent)
    pub biformer_probability: f64,
    /// Tree model probability (0.0 when absent)
    pub lgbm_probability: f64,
    /// One entry per model that answered
    pub model_predictions: Vec<ModelPrediction>,

    /// Reported trust score
    pub domain_trust_score: f64,
    /// Reported trust level
    pub domain_trust_level: TrustLevel,
    /// Fast-path whitelist result
    pub is_whitelisted: bool,
    /// Why the domain is whitelisted
    pub whitelist_reason: Option<String>,

    /// Features of the URL
    pub url_features: UrlFeatures,

    /// Rules that fired, in evaluation order
    pub rule_flags: Vec<RuleFlag>,
    /// Override decision, if any
    pub rule_override: Option<RuleOverride>,

    /// Threshold used to binarize
    pub threshold: f64,
}

/// Availability of one ensemble slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    /// Ensemble slot
    pub source: ModelSource,
    /// A provider is registered for the slot
    pub configured: bool,
    /// The provider reports itself ready
    pub available: bool,
}
