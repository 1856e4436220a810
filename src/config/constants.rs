//! Configuration constants.
//!
//! This module defines the numeric defaults used by the extractor, the trust
//! evaluator and the ensemble. Values marked as "tuned" come from the threshold
//! search run against the production models and should not be changed without
//! re-running it.

use std::time::Duration;

// Ensemble defaults
/// Default weight of the transformer encoder model
pub const DEFAULT_ELECTRA_WEIGHT: f64 = 0.40;
/// Default weight of the character-level model
pub const DEFAULT_BIFORMER_WEIGHT: f64 = 0.35;
/// Default weight of the gradient-boosted tree model
pub const DEFAULT_LGBM_WEIGHT: f64 = 0.25;
/// Phishing decision threshold (tuned for precision, flags aggressively)
pub const DEFAULT_PHISHING_THRESHOLD: f64 = 0.0863;
/// Per-model inference timeout
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(10);

// Trust adjustment applied to the fused probability
/// Fraction of the trust score removed from the fused probability
pub const TRUST_DAMPENING_FACTOR: f64 = 0.3;
/// Multiplier applied to whitelisted domains on top of trust dampening
pub const WHITELIST_DAMPENING: f64 = 0.1;
/// Boost per suspicious pattern, pushing the probability toward 1
pub const PATTERN_BOOST_PER_HIT: f64 = 0.1;
/// Cap on the total suspicious-pattern boost
pub const PATTERN_BOOST_CAP: f64 = 0.3;
/// Margin used when an override pins the probability to one side of the threshold
pub const OVERRIDE_MARGIN: f64 = 0.01;

// Rule thresholds
/// URL length above which `extremely_long_url` fires
pub const RULE_MAX_URL_LENGTH: usize = 200;
/// Subdomain count above which `excessive_subdomains` fires
pub const RULE_MAX_SUBDOMAINS: usize = 4;
/// Trust score below which `multiple_risk_indicators` may fire
pub const RULE_LOW_TRUST_SCORE: f64 = 0.2;
/// Suspicious pattern count above which `multiple_risk_indicators` may fire
pub const RULE_MIN_PATTERN_COUNT: usize = 2;
/// Trust score at or above which a high-trust domain is forced safe
pub const RULE_HIGH_TRUST_SCORE: f64 = 0.85;

// Feature extraction
/// Ports that are not considered suspicious
pub const STANDARD_PORTS: [u16; 3] = [80, 443, 8080];
/// Length of the numeric feature vector consumed by the tree model
pub const NUMERIC_VECTOR_LEN: usize = 12;

// Trust evaluation
/// Subdomain length above which `long-subdomain` is reported
pub const LONG_SUBDOMAIN_LEN: usize = 30;
/// Hyphen count in the domain label above which hyphens become suspicious
pub const MAX_DOMAIN_HYPHENS: usize = 2;
/// Penalty for a suspicious TLD missing from the penalty table
pub const DEFAULT_TLD_PENALTY: f64 = 0.2;

// External intelligence
/// Domains younger than this many days are treated as new
pub const MIN_DOMAIN_AGE_DAYS: i64 = 30;
/// Domains older than this many days earn a small trust bonus
pub const SAFE_DOMAIN_AGE_DAYS: i64 = 365;
/// Bound on the auxiliary intelligence risk adjustment (applied symmetrically)
pub const MAX_INTEL_ADJUSTMENT: f64 = 0.3;
/// Safe Browsing lookup endpoint
pub const SAFE_BROWSING_API_URL: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";
/// RDAP bootstrap service; the domain name is appended
pub const RDAP_API_URL: &str = "https://rdap.org/domain/";
/// HTTP timeout for third-party lookups in seconds
pub const INTEL_TIMEOUT_SECS: u64 = 10;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
