//! Domain extraction and URL normalization utilities.
//!
//! This module splits hostnames into subdomain, domain label, public suffix and
//! registered domain using the Public Suffix List, so multi-part suffixes such
//! as `co.uk` are never mistaken for a domain.
//!
//! Key functions:
//! - `normalize_url()` - Trims input and adds a scheme when missing
//! - `raw_host()` / `url_host()` - Extract the lowercase host as written in the URL
//! - `split_host()` - Splits a host into [`DomainParts`]
//!
//! None of these functions fail: malformed input degrades to empty fields.

use std::sync::LazyLock;

use psl::{List, Psl, Type};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Strict dotted-quad IPv4, each octet 0-255.
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("IPv4 pattern is valid")
});

/// True when the host is a literal dotted-quad IPv4 address.
///
/// Decimal (`3232235777`) and hex (`0x7f.0.0.1`) spellings do not count.
pub fn is_ipv4_literal(host: &str) -> bool {
    IPV4_PATTERN.is_match(host)
}

/// A hostname split along public-suffix boundaries.
///
/// For `https://login.mail.example.co.uk` this is
/// `subdomain = "login.mail"`, `domain = "example"`, `suffix = "co.uk"`,
/// `registered_domain = "example.co.uk"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParts {
    /// Labels left of the registered domain (may contain dots)
    pub subdomain: String,
    /// The registrable label itself
    pub domain: String,
    /// The public suffix
    pub suffix: String,
    /// `domain.suffix`, or whichever of the two is non-empty
    pub registered_domain: String,
}

impl DomainParts {
    fn new(subdomain: &str, domain: &str, suffix: &str) -> Self {
        let registered_domain = [domain, suffix]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".");
        Self {
            subdomain: subdomain.to_string(),
            domain: domain.to_string(),
            suffix: suffix.to_string(),
            registered_domain,
        }
    }

    /// Number of dot-separated labels in the subdomain (0 when there is none).
    pub fn subdomain_count(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.split('.').count()
        }
    }
}

/// Trims whitespace and prefixes `http://` when the input has no http(s) scheme.
///
/// # Examples
///
/// ```
/// use phishscore::domain::normalize_url;
///
/// assert_eq!(normalize_url("  example.com/a "), "http://example.com/a");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Returns the host of an already-normalized URL exactly as written.
///
/// The authority is sliced out of the string with userinfo and port removed,
/// then lowercased. No WHATWG host processing happens: `3232235777` stays a
/// number and Unicode labels are not converted to punycode. IPv6 hosts keep
/// their brackets.
pub fn raw_host(normalized: &str) -> String {
    let after_scheme = normalized
        .split_once("://")
        .map_or(normalized, |(_, rest)| rest);
    let authority = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => &host_port[..=end],
            None => host_port,
        }
    } else {
        host_port
            .split_once(':')
            .map_or(host_port, |(host, _)| host)
    };
    host.trim().trim_end_matches('.').to_lowercase()
}

/// Normalizes a URL and returns its lowercase host as written, without a
/// trailing dot. Empty input yields an empty string.
pub fn url_host(raw: &str) -> String {
    raw_host(&normalize_url(raw))
}

/// Longest ICANN public suffix of `host`.
///
/// Private registry entries (`github.io`, `netlify.app`) are skipped, so a
/// free hosting subdomain never becomes a registrable domain of its own.
fn icann_suffix(host: &str) -> Option<&str> {
    let mut candidate = host;
    loop {
        let suffix = List.suffix(candidate.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        let matched = candidate.get(candidate.len() - suffix.as_bytes().len()..)?;
        if suffix.typ() == Some(Type::Icann) {
            return Some(matched);
        }
        // Private entry: retry on its parent
        candidate = matched.split_once('.')?.1;
    }
}

/// Splits a hostname into its public-suffix-aware parts.
///
/// Only ICANN suffixes count: `paypal.github.io` is subdomain `paypal`,
/// domain `github`, suffix `io`. Literal IPv4 and bracketed IPv6 hosts become
/// the domain with no suffix. Hosts whose last label is not a known public
/// suffix (e.g. `intranet.local`) are treated as having no suffix: the last
/// label becomes the domain.
pub fn split_host(host: &str) -> DomainParts {
    let host = host.trim().trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return DomainParts::default();
    }

    if is_ipv4_literal(&host) || host.starts_with('[') {
        return DomainParts::new("", &host, "");
    }

    if let Some(suffix) = icann_suffix(&host) {
        // The whole host is a public suffix (e.g. "gov.uk")
        if suffix.len() == host.len() {
            return DomainParts::new("", "", suffix);
        }
        let prefix = host[..host.len() - suffix.len()].trim_end_matches('.');
        return match prefix.rsplit_once('.') {
            Some((subdomain, domain)) => DomainParts::new(subdomain, domain, suffix),
            None => DomainParts::new("", prefix, suffix),
        };
    }

    // Unknown suffix: last label is the domain, the rest is subdomain
    match host.rsplit_once('.') {
        Some((rest, last)) => DomainParts::new(rest, last, ""),
        None => DomainParts::new("", &host, ""),
    }
}

/// Normalizes a URL and splits its host. Never fails.
pub fn domain_parts(raw: &str) -> DomainParts {
    split_host(&url_host(raw))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
