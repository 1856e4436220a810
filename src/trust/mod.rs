//! Domain trust evaluation.
//!
//! This module classifies how trustworthy a URL's domain is, using the static
//! reference tables plus pattern detectors on the parsed domain. Scoring runs
//! in a fixed order:
//!
//! 1. Database lookup sets the base score and confidence
//! 2. Government/education status can only raise them
//! 3. Keyword analysis (additive)
//! 4. Suspicious pattern detection (additive)
//! 5. TLD analysis (additive)
//! 6. Clamp to [0, 1] and map to a [`TrustLevel`]
//!
//! The evaluator is stateless after construction and safe to share.

mod signals;
mod types;

use crate::config::ReferenceData;
use crate::domain::{normalize_url, split_host, url_host, DomainParts};
use crate::features::round_to;

pub use types::{SuspiciousPattern, TrustEvaluation, TrustLevel};

/// Base score and confidence from the trust databases.
#[derive(Debug, Clone, PartialEq)]
struct DatabaseMatch {
    score: f64,
    confidence: f64,
    reason: String,
}

/// Regional TLDs checked when looking for a known brand under another suffix.
const REGIONAL_VARIANT_TLDS: [&str; 4] = ["com", "org", "net", "io"];

/// Evaluates domain trustworthiness from static reference data.
///
/// # Examples
///
/// ```
/// use phishscore::{DomainTrustEvaluator, TrustLevel};
///
/// let evaluator = DomainTrustEvaluator::default();
/// let evaluation = evaluator.evaluate("https://www.google.com");
/// assert!(evaluation.trust_level >= TrustLevel::High);
///
/// let (whitelisted, reason) = evaluator.is_whitelisted("https://www.microsoft.com");
/// assert!(whitelisted);
/// assert!(reason.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct DomainTrustEvaluator {
    reference: ReferenceData,
}

impl Default for DomainTrustEvaluator {
    fn default() -> Self {
        Self::new(ReferenceData::default())
    }
}

impl DomainTrustEvaluator {
    /// Creates an evaluator, merging `extra_trusted_domains` into the high-trust set.
    pub fn new(mut reference: ReferenceData) -> Self {
        let extras = std::mem::take(&mut reference.extra_trusted_domains);
        reference.high_trust_domains.extend(extras);
        log::info!(
            "Trust evaluator initialized with {} high-trust domains",
            reference.high_trust_domains.len()
        );
        Self { reference }
    }

    /// Reference tables in use (with extra trusted domains already merged).
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Evaluates the trustworthiness of a URL or bare domain.
    pub fn evaluate(&self, url: &str) -> TrustEvaluation {
        let host = url_host(url);
        let DomainParts {
            subdomain,
            domain,
            suffix,
            registered_domain: full_domain,
        } = split_host(&host);
        let url_lower = normalize_url(url).to_lowercase();

        let mut reasons = Vec::new();

        let base = self.check_databases(&full_domain, &domain);
        let mut score = base.score;
        let mut confidence = base.confidence;
        reasons.push(base.reason);

        let is_government = self.is_government(&full_domain, &suffix);
        let is_educational = self.reference.educational_suffixes.contains(&suffix);
        if is_government {
            score = score.max(0.9);
            confidence = confidence.max(0.95);
            reasons.push("Government domain detected".to_string());
        }
        if is_educational {
            score = score.max(0.8);
            confidence = confidence.max(0.85);
            reasons.push("Educational domain detected".to_string());
        }

        let keywords = signals::analyze_keywords(&self.reference, &domain, &subdomain);
        score += keywords.adjustment;
        reasons.extend(keywords.reasons);

        let patterns = signals::detect_suspicious_patterns(
            &self.reference,
            &url_lower,
            &domain,
            &subdomain,
        );
        score += patterns.adjustment;
        reasons.extend(patterns.reasons);

        let tld = signals::analyze_tld(&self.reference, &suffix);
        score += tld.adjustment;
        reasons.extend(tld.reasons);

        let trust_score = round_to(score.clamp(0.0, 1.0), 4);
        let trust_level = TrustLevel::from_score(trust_score);
        let recommendation = recommendation(trust_level, &patterns.found);

        log::debug!(
            "Trust for {}: score={} level={} patterns={}",
            full_domain,
            trust_score,
            trust_level,
            patterns.found.len()
        );

        TrustEvaluation {
            domain,
            subdomain,
            suffix,
            full_domain,
            trust_level,
            trust_score,
            confidence: round_to(confidence.clamp(0.0, 1.0), 4),
            is_government,
            is_educational,
            reasons,
            keyword_matches: keywords.found,
            suspicious_patterns: patterns.found,
            recommendation,
        }
    }

    /// Fast whitelist check on the registered domain.
    ///
    /// True when the registered domain is a top site, a high-trust domain or an
    /// explicit government domain. Independent of the scoring pipeline.
    pub fn is_whitelisted(&self, url: &str) -> (bool, Option<String>) {
        let full_domain = split_host(&url_host(url)).registered_domain;
        if full_domain.is_empty() {
            return (false, None);
        }

        if self.reference.top_sites.contains(&full_domain) {
            return (true, Some(format!("Top global website: {full_domain}")));
        }
        if self.reference.high_trust_domains.contains(&full_domain) {
            return (true, Some(format!("High-trust domain: {full_domain}")));
        }
        if self.reference.government_domains.contains(&full_domain) {
            return (true, Some(format!("Government domain: {full_domain}")));
        }

        (false, None)
    }

    fn check_databases(&self, full_domain: &str, domain: &str) -> DatabaseMatch {
        let found = |score: f64, confidence: f64, reason: String| DatabaseMatch {
            score,
            confidence,
            reason,
        };

        if self.reference.top_sites.contains(full_domain) {
            return found(0.95, 0.98, format!("Top global website: {full_domain}"));
        }
        if self.reference.high_trust_domains.contains(full_domain) {
            return found(0.85, 0.95, format!("High-trust domain: {full_domain}"));
        }
        // google.com.br -> google.com
        if !domain.is_empty() {
            if let Some(variant) = REGIONAL_VARIANT_TLDS
                .iter()
                .map(|tld| format!("{domain}.{tld}"))
                .find(|variant| self.reference.high_trust_domains.contains(variant))
            {
                return found(
                    0.80,
                    0.90,
                    format!("Regional variant of trusted domain: {variant}"),
                );
            }
        }
        if self.reference.medium_trust_domains.contains(full_domain) {
            return found(0.60, 0.75, format!("Medium-trust domain: {full_domain}"));
        }

        found(0.30, 0.50, format!("Unknown domain: {full_domain}"))
    }

    fn is_government(&self, full_domain: &str, suffix: &str) -> bool {
        if self.reference.government_domains.contains(full_domain) {
            return true;
        }
        self.reference.government_tld_patterns.iter().any(|pattern| {
            let dotted = format!(".{pattern}");
            suffix == pattern || suffix.ends_with(&dotted) || full_domain.ends_with(&dotted)
        })
    }
}

/// Advice text for a trust level; the suspicious template names up to two patterns.
fn recommendation(level: TrustLevel, patterns: &[SuspiciousPattern]) -> String {
    match level {
        TrustLevel::Highest => "This domain is highly trusted. Safe to proceed.".to_string(),
        TrustLevel::High => {
            "This domain has a good reputation. Exercise standard caution.".to_string()
        }
        TrustLevel::Medium => {
            "This domain has moderate trust. Verify before entering sensitive information."
                .to_string()
        }
        TrustLevel::Low => {
            "This domain is unknown. Be cautious with any sensitive actions.".to_string()
        }
        TrustLevel::Suspicious => {
            let listed: Vec<String> = patterns.iter().take(2).map(|p| p.to_string()).collect();
            format!(
                "This domain shows suspicious patterns: {}. Avoid entering personal information.",
                listed.join(", ")
            )
        }
        TrustLevel::Dangerous => {
            "This domain appears dangerous. Do not proceed or enter any information.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
