//! Rule table evaluated after fusion.
//!
//! Rules run in a fixed priority order. At most one override survives: an
//! earlier override is kept unless a later rule explicitly replaces or clears it.

use super::types::{RuleFlag, RuleOverride};
use crate::config::{
    RULE_HIGH_TRUST_SCORE, RULE_LOW_TRUST_SCORE, RULE_MAX_SUBDOMAINS, RULE_MAX_URL_LENGTH,
    RULE_MIN_PATTERN_COUNT,
};
use crate::features::UrlFeatures;
use crate::trust::{TrustEvaluation, TrustLevel};

/// Flags that fired and the surviving override.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct RuleVerdict {
    pub flags: Vec<RuleFlag>,
    pub override_decision: Option<RuleOverride>,
}

impl RuleVerdict {
    fn fire(&mut self, flag: RuleFlag) {
        log::trace!("Rule fired: {}", flag);
        self.flags.push(flag);
    }
}

pub(super) fn evaluate_rules(features: &UrlFeatures, trust: &TrustEvaluation) -> RuleVerdict {
    let mut verdict = RuleVerdict::default();
    let pattern_count = trust.suspicious_patterns.len();

    if trust.trust_level >= TrustLevel::High && trust.trust_score >= RULE_HIGH_TRUST_SCORE {
        verdict.fire(RuleFlag::HighTrustDomain);
        verdict.override_decision = Some(RuleOverride::Safe);
    }

    if features.has_ip {
        verdict.fire(RuleFlag::IpAddressUrl);
        verdict
            .override_decision
            .get_or_insert(RuleOverride::Phishing);
    }

    if features.length > RULE_MAX_URL_LENGTH {
        verdict.fire(RuleFlag::ExtremelyLongUrl);
    }

    if features.num_subdomains > RULE_MAX_SUBDOMAINS {
        verdict.fire(RuleFlag::ExcessiveSubdomains);
    }

    if trust.trust_score < RULE_LOW_TRUST_SCORE && pattern_count > RULE_MIN_PATTERN_COUNT {
        verdict.fire(RuleFlag::MultipleRiskIndicators);
        verdict
            .override_decision
            .get_or_insert(RuleOverride::Phishing);
    }

    if trust.is_government {
        verdict.fire(RuleFlag::GovernmentDomain);
        verdict.override_decision = Some(RuleOverride::Safe);
    }

    // Impersonation vetoes "safe" but does not force "phishing"
    if trust.has_brand_impersonation() {
        verdict.fire(RuleFlag::PotentialBrandImpersonation);
        if verdict.override_decision == Some(RuleOverride::Safe) {
            verdict.override_decision = None;
        }
    }

    verdict
}
