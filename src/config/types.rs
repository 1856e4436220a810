//! Configuration types.
//!
//! This module defines the predictor configuration and the log option enums
//! parsed from the command line.

use std::time::Duration;

use strum_macros::{Display, EnumString, VariantNames};

use crate::config::constants::{
    DEFAULT_BIFORMER_WEIGHT, DEFAULT_ELECTRA_WEIGHT, DEFAULT_LGBM_WEIGHT, DEFAULT_MODEL_TIMEOUT,
    DEFAULT_PHISHING_THRESHOLD,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Ensemble predictor configuration.
///
/// Weights do not need to sum to 1; `EnsemblePredictor::new` normalizes them
/// and rejects configurations whose weights sum to zero.
///
/// # Examples
///
/// ```
/// use phishscore::PredictorConfig;
///
/// let config = PredictorConfig {
///     threshold: 0.5,
///     enable_rule_overrides: false,
///     ..Default::default()
/// };
/// assert_eq!(config.electra_weight, 0.40);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    /// Weight of the transformer encoder model
    pub electra_weight: f64,

    /// Weight of the character-level model
    pub biformer_weight: f64,

    /// Weight of the gradient-boosted tree model
    pub lgbm_weight: f64,

    /// Probability at or above which a URL is classified as phishing
    pub threshold: f64,

    /// Dampen the fused probability by domain trust and whitelisting
    pub enable_trust_adjustment: bool,

    /// Apply the rule table (safe/phishing overrides)
    pub enable_rule_overrides: bool,

    /// Timeout for a single model call; a timed-out model counts as unavailable
    pub model_timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            electra_weight: DEFAULT_ELECTRA_WEIGHT,
            biformer_weight: DEFAULT_BIFORMER_WEIGHT,
            lgbm_weight: DEFAULT_LGBM_WEIGHT,
            threshold: DEFAULT_PHISHING_THRESHOLD,
            enable_trust_adjustment: true,
            enable_rule_overrides: true,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("debug").unwrap(), LogLevel::Debug);
        // Case-insensitive so `--log-level INFO` works too
        assert_eq!(LogLevel::from_str("INFO").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from_str("plain").unwrap(), LogFormat::Plain);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_predictor_config_default() {
        let config = PredictorConfig::default();
        assert_eq!(config.electra_weight, 0.40);
        assert_eq!(config.biformer_weight, 0.35);
        assert_eq!(config.lgbm_weight, 0.25);
        assert_eq!(config.threshold, 0.0863);
        assert!(config.enable_trust_adjustment);
        assert!(config.enable_rule_overrides);
        assert_eq!(config.model_timeout, Duration::from_secs(10));
    }
}
