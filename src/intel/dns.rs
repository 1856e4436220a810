//! DNS hygiene checks (A, MX and SPF records).

use std::sync::Arc;

use serde::Serialize;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::IntelError;

/// DNS records found for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsReport {
    /// Domain that was queried
    pub domain: String,
    /// At least one A record
    pub has_a_record: bool,
    /// At least one MX record
    pub has_mx_record: bool,
    /// A TXT record starting an SPF policy (`v=spf1`)
    pub has_spf_record: bool,
    /// IPv4 addresses from the A records
    pub ip_addresses: Vec<String>,
}

/// Looks up the records that distinguish a real site from a throwaway one.
#[derive(Clone)]
pub struct DnsChecker {
    resolver: Arc<TokioAsyncResolver>,
}

impl std::fmt::Debug for DnsChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsChecker").finish_non_exhaustive()
    }
}

/// "No such record" is an answer, not a failure.
fn empty_on_no_records<T>(domain: &str, result: Result<Vec<T>, ResolveError>) -> Result<Vec<T>, IntelError> {
    match result {
        Ok(records) => Ok(records),
        Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => Ok(Vec::new()),
        Err(e) => Err(IntelError::Dns {
            domain: domain.to_string(),
            message: e.to_string(),
        }),
    }
}

impl DnsChecker {
    /// Wraps a shared resolver (see `initialization::init_resolver`).
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    /// IPv4 addresses of `domain`.
    pub async fn lookup_a(&self, domain: &str) -> Result<Vec<String>, IntelError> {
        let result = self
            .resolver
            .ipv4_lookup(domain)
            .await
            .map(|lookup| lookup.iter().map(|a| a.to_string()).collect());
        empty_on_no_records(domain, result)
    }

    /// Mail exchangers of `domain`.
    pub async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, IntelError> {
        let result = self
            .resolver
            .mx_lookup(domain)
            .await
            .map(|lookup| lookup.iter().map(|mx| mx.exchange().to_utf8()).collect());
        empty_on_no_records(domain, result)
    }

    /// TXT records of `domain`, multi-string records joined.
    pub async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, IntelError> {
        let result = self.resolver.txt_lookup(domain).await.map(|lookup| {
            lookup
                .iter()
                .map(|txt| {
                    txt.iter()
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                        .collect::<Vec<_>>()
                        .join("")
                })
                .collect()
        });
        empty_on_no_records(domain, result)
    }

    /// Runs all three lookups concurrently. Failed lookups count as "no record".
    pub async fn check_domain(&self, domain: &str) -> DnsReport {
        let (a, mx, txt) = tokio::join!(
            self.lookup_a(domain),
            self.lookup_mx(domain),
            self.lookup_txt(domain)
        );

        let or_warn = |kind: &str, result: Result<Vec<String>, IntelError>| {
            result.unwrap_or_else(|e| {
                log::warn!("{} lookup failed: {}", kind, e);
                Vec::new()
            })
        };
        let ip_addresses = or_warn("A", a);
        let mx = or_warn("MX", mx);
        let txt = or_warn("TXT", txt);

        DnsReport {
            domain: domain.to_string(),
            has_a_record: !ip_addresses.is_empty(),
            has_mx_record: !mx.is_empty(),
            has_spf_record: txt.iter().any(|record| is_spf_record(record)),
            ip_addresses,
        }
    }
}

/// Whether a TXT record is an SPF policy.
pub(crate) fn is_spf_record(record: &str) -> bool {
    record.trim_start().to_ascii_lowercase().starts_with("v=spf1")
}
