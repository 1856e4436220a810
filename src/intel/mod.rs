//! Auxiliary threat intelligence.
//!
//! Third-party signals gathered alongside a prediction: Safe Browsing
//! matches, domain age and DNS hygiene. They never change an
//! [`EnsemblePrediction`](crate::EnsemblePrediction); callers combine the
//! bounded [`risk_adjustment`] with the prediction themselves.
//!
//! Every lookup fails open. A missing API key, a network error or a DNS
//! timeout leaves the corresponding section empty or negative, never an error.
//! Registration dates come from RDAP unless the caller already has one.

mod dns;
mod safe_browsing;
mod whois;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{MAX_INTEL_ADJUSTMENT, MIN_DOMAIN_AGE_DAYS, SAFE_DOMAIN_AGE_DAYS};
use crate::domain::domain_parts;

pub use dns::{DnsChecker, DnsReport};
pub use safe_browsing::{SafeBrowsingClient, SafeBrowsingVerdict};
pub use whois::{Registration, WhoisClient};

const SAFE_BROWSING_RISK: f64 = 0.30;
const NEW_DOMAIN_RISK: f64 = 0.15;
const OLD_DOMAIN_CREDIT: f64 = 0.10;
const NO_A_RECORD_RISK: f64 = 0.10;
const MAIL_SETUP_CREDIT: f64 = 0.05;

/// Registration age of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainAge {
    /// Registration date reported by the registry
    pub creation_date: DateTime<Utc>,
    /// Whole days between registration and the check
    pub age_days: i64,
    /// Registrar, when known
    pub registrar: Option<String>,
}

impl DomainAge {
    /// Computes the age of a domain created at `created`, as of `now`.
    pub fn from_creation_date(created: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            creation_date: created,
            age_days: (now - created).num_days(),
            registrar: None,
        }
    }

    /// Records the registrar reported alongside the creation date.
    pub fn with_registrar(mut self, registrar: Option<String>) -> Self {
        self.registrar = registrar;
        self
    }

    /// Younger than 30 days.
    pub fn is_new(&self) -> bool {
        self.age_days < MIN_DOMAIN_AGE_DAYS
    }
}

/// Results of the auxiliary lookups for one URL. Missing sections were not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntelReport {
    /// Safe Browsing verdict
    pub safe_browsing: Option<SafeBrowsingVerdict>,
    /// Registration age
    pub domain_age: Option<DomainAge>,
    /// DNS records
    pub dns: Option<DnsReport>,
}

/// Bounded adjustment to a phishing probability, in [-0.3, 0.3].
///
/// # Examples
///
/// ```
/// use phishscore::intel::{risk_adjustment, IntelReport};
///
/// assert_eq!(risk_adjustment(&IntelReport::default()), 0.0);
/// ```
pub fn risk_adjustment(report: &IntelReport) -> f64 {
    let mut adjustment = 0.0;

    if report
        .safe_browsing
        .as_ref()
        .is_some_and(|verdict| verdict.is_malicious)
    {
        adjustment += SAFE_BROWSING_RISK;
    }

    if let Some(age) = &report.domain_age {
        if age.is_new() {
            adjustment += NEW_DOMAIN_RISK;
        } else if age.age_days > SAFE_DOMAIN_AGE_DAYS {
            adjustment -= OLD_DOMAIN_CREDIT;
        }
    }

    if let Some(dns) = &report.dns {
        if !dns.has_a_record {
            adjustment += NO_A_RECORD_RISK;
        }
        if dns.has_mx_record && dns.has_spf_record {
            adjustment -= MAIL_SETUP_CREDIT;
        }
    }

    adjustment.clamp(-MAX_INTEL_ADJUSTMENT, MAX_INTEL_ADJUSTMENT)
}

/// Runs the configured lookups for a URL.
#[derive(Debug, Clone, Default)]
pub struct IntelChecker {
    safe_browsing: Option<SafeBrowsingClient>,
    dns: Option<DnsChecker>,
    whois: Option<WhoisClient>,
}

impl IntelChecker {
    /// Creates a checker with no lookups enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables Safe Browsing lookups.
    pub fn with_safe_browsing(mut self, client: SafeBrowsingClient) -> Self {
        self.safe_browsing = Some(client);
        self
    }

    /// Enables DNS lookups.
    pub fn with_dns(mut self, checker: DnsChecker) -> Self {
        self.dns = Some(checker);
        self
    }

    /// Enables registration date lookups.
    pub fn with_whois(mut self, client: WhoisClient) -> Self {
        self.whois = Some(client);
        self
    }

    /// Checks a URL.
    ///
    /// A `creation_date` supplied by the caller wins over the registration
    /// lookup, which then is skipped.
    pub async fn check(&self, url: &str, creation_date: Option<DateTime<Utc>>) -> IntelReport {
        let domain = domain_parts(url).registered_domain;
        let now = Utc::now();

        let safe_browsing = async {
            match &self.safe_browsing {
                Some(client) if client.is_enabled() => Some(client.check_url(url).await),
                _ => None,
            }
        };
        let dns = async {
            match &self.dns {
                Some(checker) if !domain.is_empty() => Some(checker.check_domain(&domain).await),
                _ => None,
            }
        };
        let domain_age = async {
            match (creation_date, &self.whois) {
                (Some(created), _) => Some(DomainAge::from_creation_date(created, now)),
                (None, Some(client)) if !domain.is_empty() => client.domain_age(&domain, now).await,
                _ => None,
            }
        };
        let (safe_browsing, dns, domain_age) = tokio::join!(safe_browsing, dns, domain_age);

        let report = IntelReport {
            safe_browsing,
            domain_age,
            dns,
        };
        log::debug!(
            "Intel for {}: adjustment={:+.2}",
            url,
            risk_adjustment(&report)
        );
        report
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
