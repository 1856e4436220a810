//! Additive trust signals: keywords, suspicious patterns and TLD.
//!
//! Each analysis only moves the running score; none of them can reset it.

use std::sync::LazyLock;

use regex::Regex;

use super::types::SuspiciousPattern;
use crate::config::{ReferenceData, LONG_SUBDOMAIN_LEN, MAX_DOMAIN_HYPHENS};

const HIGH_KEYWORD_BONUS: f64 = 0.10;
const MEDIUM_KEYWORD_BONUS: f64 = 0.05;
const BRAND_PRETEXT_PENALTY: f64 = 0.30;
const SUBSTRING_PENALTY: f64 = 0.15;
const HYPHEN_PENALTY: f64 = 0.10;
const MAX_HYPHEN_STEPS: usize = 3;
const BRAND_IN_SUBDOMAIN_PENALTY: f64 = 0.25;
const LONG_SUBDOMAIN_PENALTY: f64 = 0.15;
const IP_LIKE_PENALTY: f64 = 0.20;
const PUNYCODE_PENALTY: f64 = 0.10;
const TRUSTED_TLD_BONUS: f64 = 0.05;

static IP_LIKE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}-\d{1,3}-\d{1,3}").expect("IP-like pattern is valid"));

/// Outcome of one additive analysis step.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Signal<T> {
    pub found: Vec<T>,
    pub adjustment: f64,
    pub reasons: Vec<String>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            found: Vec::new(),
            adjustment: 0.0,
            reasons: Vec::new(),
        }
    }
}

/// Trust keywords in the domain, and brand-plus-pretext combinations.
pub(super) fn analyze_keywords(
    reference: &ReferenceData,
    domain: &str,
    subdomain: &str,
) -> Signal<String> {
    let mut signal = Signal::default();

    for keyword in reference.high_trust_keywords.iter().filter(|k| !k.is_empty()) {
        if domain.contains(keyword.as_str()) {
            signal.found.push(keyword.clone());
            signal.adjustment += HIGH_KEYWORD_BONUS;
            signal
                .reasons
                .push(format!("Contains trusted keyword: {keyword}"));
        }
    }

    for keyword in reference.medium_trust_keywords.iter().filter(|k| !k.is_empty()) {
        let present = domain.contains(keyword.as_str()) || subdomain.contains(keyword.as_str());
        if present && !signal.found.contains(keyword) {
            signal.found.push(keyword.clone());
            signal.adjustment += MEDIUM_KEYWORD_BONUS;
            signal
                .reasons
                .push(format!("Contains trust-indicating keyword: {keyword}"));
        }
    }

    // Brand name next to "login", "verify"... is the classic phishing pretext
    if !signal.found.is_empty() {
        let full_host = if subdomain.is_empty() {
            domain.to_string()
        } else {
            format!("{subdomain}.{domain}")
        };
        let suspicious_count = reference
            .suspicious_keywords
            .iter()
            .filter(|k| !k.is_empty() && full_host.contains(k.as_str()))
            .count();
        if suspicious_count > 0 {
            signal.adjustment -= BRAND_PRETEXT_PENALTY;
            signal.reasons.push(format!(
                "Warning: Brand keyword with {suspicious_count} suspicious terms"
            ));
        }
    }

    signal
}

/// Structural phishing patterns in the domain and URL.
pub(super) fn detect_suspicious_patterns(
    reference: &ReferenceData,
    url_lower: &str,
    domain: &str,
    subdomain: &str,
) -> Signal<SuspiciousPattern> {
    let mut signal = Signal::default();

    let substrings: Vec<&String> = reference
        .phishing_substrings
        .iter()
        .filter(|s| !s.is_empty() && (subdomain.contains(s.as_str()) || domain.contains(s.as_str())))
        .collect();
    if !substrings.is_empty() {
        signal.adjustment -= SUBSTRING_PENALTY * substrings.len() as f64;
        let listed: Vec<&str> = substrings.iter().take(3).map(|s| s.as_str()).collect();
        signal
            .reasons
            .push(format!("Suspicious substrings found: {}", listed.join(", ")));
        signal.found.extend(
            substrings
                .into_iter()
                .map(|s| SuspiciousPattern::Substring(s.clone())),
        );
    }

    let hyphen_count = domain.matches('-').count();
    if hyphen_count > MAX_DOMAIN_HYPHENS {
        let steps = (hyphen_count - MAX_DOMAIN_HYPHENS).min(MAX_HYPHEN_STEPS);
        signal
            .found
            .push(SuspiciousPattern::ExcessiveHyphens(hyphen_count));
        signal.adjustment -= HYPHEN_PENALTY * steps as f64;
        signal
            .reasons
            .push(format!("Excessive hyphens in domain: {hyphen_count}"));
    }

    // First impersonated brand wins
    if let Some(brand) = reference
        .high_trust_keywords
        .iter()
        .find(|b| !b.is_empty() && subdomain.contains(b.as_str()) && !domain.contains(b.as_str()))
    {
        signal
            .found
            .push(SuspiciousPattern::BrandInSubdomain(brand.clone()));
        signal.adjustment -= BRAND_IN_SUBDOMAIN_PENALTY;
        signal.reasons.push(format!(
            "Brand name '{brand}' in subdomain (potential impersonation)"
        ));
    }

    if subdomain.chars().count() > LONG_SUBDOMAIN_LEN {
        signal.found.push(SuspiciousPattern::LongSubdomain);
        signal.adjustment -= LONG_SUBDOMAIN_PENALTY;
        signal.reasons.push("Unusually long subdomain".to_string());
    }

    if IP_LIKE_PATTERN.is_match(domain) {
        signal.found.push(SuspiciousPattern::IpLikeDomain);
        signal.adjustment -= IP_LIKE_PENALTY;
        signal
            .reasons
            .push("IP-address-like pattern in domain".to_string());
    }

    if url_lower.contains("xn--") {
        signal.found.push(SuspiciousPattern::Punycode);
        signal.adjustment -= PUNYCODE_PENALTY;
        signal
            .reasons
            .push("Internationalized domain name (potential homograph attack)".to_string());
    }

    signal
}

/// High-risk TLD penalty and trusted TLD bonus.
pub(super) fn analyze_tld(reference: &ReferenceData, suffix: &str) -> Signal<()> {
    let mut signal = Signal::default();

    if reference.suspicious_tlds.contains(suffix) {
        signal.adjustment -= reference.tld_penalty(suffix);
        signal.reasons.push(format!("High-risk TLD: {suffix}"));
    }

    if reference.trusted_tlds.contains(suffix) {
        signal.adjustment += TRUSTED_TLD_BONUS;
    }

    signal
}
