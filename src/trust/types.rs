//! Trust evaluation records.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString};

/// Ordered trust tier derived from the clamped trust score.
///
/// Variants are declared from least to most trusted, so `Ord` follows trust:
/// `Dangerous < Suspicious < Low < Medium < High < Highest`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrustLevel {
    /// Score below 0.15
    Dangerous,
    /// Score in [0.15, 0.30)
    Suspicious,
    /// Score in [0.30, 0.50)
    Low,
    /// Score in [0.50, 0.70)
    Medium,
    /// Score in [0.70, 0.85)
    High,
    /// Score of 0.85 or more
    Highest,
}

impl TrustLevel {
    /// Maps a clamped trust score to its tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            TrustLevel::Highest
        } else if score >= 0.70 {
            TrustLevel::High
        } else if score >= 0.50 {
            TrustLevel::Medium
        } else if score >= 0.30 {
            TrustLevel::Low
        } else if score >= 0.15 {
            TrustLevel::Suspicious
        } else {
            TrustLevel::Dangerous
        }
    }
}

/// A suspicious pattern found in a domain.
///
/// Reported as a short tag (see `Display`), e.g. `login-`,
/// `excessive-hyphens (4)` or `brand-in-subdomain (paypal)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuspiciousPattern {
    /// A known phishing fragment such as `login-` or `-secure`
    Substring(String),
    /// More than two hyphens in the domain label
    ExcessiveHyphens(usize),
    /// A brand keyword in the subdomain but not in the domain label
    BrandInSubdomain(String),
    /// Subdomain longer than 30 characters
    LongSubdomain,
    /// Dash-separated numbers that look like an IP address
    IpLikeDomain,
    /// Punycode (`xn--`) anywhere in the URL
    Punycode,
}

impl SuspiciousPattern {
    /// Whether this pattern is evidence of brand impersonation.
    pub fn is_brand_impersonation(&self) -> bool {
        matches!(self, SuspiciousPattern::BrandInSubdomain(_))
    }
}

impl fmt::Display for SuspiciousPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuspiciousPattern::Substring(fragment) => write!(f, "{fragment}"),
            SuspiciousPattern::ExcessiveHyphens(count) => write!(f, "excessive-hyphens ({count})"),
            SuspiciousPattern::BrandInSubdomain(brand) => {
                write!(f, "brand-in-subdomain ({brand})")
            }
            SuspiciousPattern::LongSubdomain => write!(f, "long-subdomain"),
            SuspiciousPattern::IpLikeDomain => write!(f, "ip-like-domain"),
            SuspiciousPattern::Punycode => write!(f, "punycode-domain"),
        }
    }
}

impl Serialize for SuspiciousPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Trust evaluation of one domain.
///
/// `trust_score` and `confidence` are clamped to [0, 1] and rounded to 4
/// decimals; `trust_level` is derived from the reported score. `reasons` is in
/// rule order: database match, government/education, keywords, suspicious
/// patterns, TLD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustEvaluation {
    /// Registrable label
    pub domain: String,
    /// Subdomain labels
    pub subdomain: String,
    /// Public suffix
    pub suffix: String,
    /// Registered domain
    pub full_domain: String,
    /// Tier of `trust_score`
    pub trust_level: TrustLevel,
    /// Trust score in [0, 1]
    pub trust_score: f64,
    /// Confidence in the score, in [0, 1]
    pub confidence: f64,
    /// Government domain (explicit list or government suffix)
    pub is_government: bool,
    /// Educational suffix
    pub is_educational: bool,
    /// Human-readable reasons in rule order
    pub reasons: Vec<String>,
    /// Trust keywords found in the domain
    pub keyword_matches: Vec<String>,
    /// Suspicious patterns found
    pub suspicious_patterns: Vec<SuspiciousPattern>,
    /// Advice keyed off `trust_level`
    pub recommendation: String,
}

impl TrustEvaluation {
    /// Whether any suspicious pattern indicates brand impersonation.
    pub fn has_brand_impersonation(&self) -> bool {
        self.suspicious_patterns
            .iter()
            .any(SuspiciousPattern::is_brand_impersonation)
    }
}
