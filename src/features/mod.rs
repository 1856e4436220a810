//! URL feature extraction.
//!
//! This module turns a URL into a fixed set of structural and statistical
//! features (lengths, entropy, character classes, structural flags). The
//! extractor is pure and synchronous: no I/O, no shared mutable state, so one
//! instance can be used from many tasks at once.
//!
//! Malformed input never fails. The URL is normalized first and any part that
//! cannot be parsed degrades to an empty string.

mod entropy;
mod types;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{ReferenceData, NUMERIC_VECTOR_LEN, STANDARD_PORTS};
use crate::domain::{is_ipv4_literal, normalize_url, raw_host, split_host};

pub use entropy::shannon_entropy;
pub(crate) use entropy::round_to;
pub use types::UrlFeatures;

/// Percent-encoded byte.
static PERCENT_ENCODED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9a-fA-F]{2}").expect("percent pattern is valid"));

/// Raw path, query and fragment of a normalized URL, exactly as written.
///
/// Taken from the string rather than from `url::Url` because the parser
/// percent-encodes and fills in an empty path with `/`, which would change
/// the lengths the tree model was trained on.
#[derive(Debug, Default, PartialEq, Eq)]
struct RawComponents<'a> {
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

fn split_components(url: &str) -> RawComponents<'_> {
    let after_scheme = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    let Some(netloc_end) = after_scheme.find(['/', '?', '#']) else {
        return RawComponents::default();
    };
    let rest = &after_scheme[netloc_end..];
    let (before_fragment, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    let (path, query) = before_fragment
        .split_once('?')
        .unwrap_or((before_fragment, ""));
    RawComponents {
        path,
        query,
        fragment,
    }
}

/// Counts distinct query keys that carry a non-empty value.
fn count_params(query: &str) -> usize {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, _)| key.into_owned())
        .collect::<HashSet<_>>()
        .len()
}

/// Extracts [`UrlFeatures`] from URLs.
///
/// # Examples
///
/// ```
/// use phishscore::FeatureExtractor;
///
/// let extractor = FeatureExtractor::default();
/// let features = extractor.extract("http://192.168.1.1/login");
/// assert!(features.has_ip);
/// assert_eq!(features.path_length, 6);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    path_brand_tokens: Vec<String>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(&ReferenceData::default())
    }
}

impl FeatureExtractor {
    /// Creates an extractor using the brand tokens from the reference data.
    pub fn new(reference: &ReferenceData) -> Self {
        Self {
            path_brand_tokens: reference.path_brand_tokens.clone(),
        }
    }

    /// Extracts all features from a URL.
    pub fn extract(&self, raw_url: &str) -> UrlFeatures {
        let url = normalize_url(raw_url);
        // Host as written: a decimal IP or a Unicode label is not rewritten
        let hostname = raw_host(&url);
        let port = url::Url::parse(&url).ok().and_then(|u| u.port());
        let parts = split_host(&hostname);
        let components = split_components(&url);

        // Character analysis
        let length = url.chars().count();
        let digits = url.chars().filter(|c| c.is_numeric()).count();
        let letters = url.chars().filter(|c| c.is_alphabetic()).count();
        let uppercase = url.chars().filter(|c| c.is_uppercase()).count();
        let lowercase = url.chars().filter(|c| c.is_lowercase()).count();
        let special_chars = url.chars().filter(|c| !c.is_alphanumeric()).count();
        let denominator = if length == 0 { 1.0 } else { length as f64 };
        let ratio = |count: usize| round_to(count as f64 / denominator, 4);

        // Structure
        let has_ip = is_ipv4_literal(&hostname);
        let has_punycode = hostname.contains("xn--");
        let has_encoded = PERCENT_ENCODED_PATTERN.is_match(components.path)
            || PERCENT_ENCODED_PATTERN.is_match(components.query);

        // Suspicious patterns
        let has_suspicious_port = port.is_some_and(|p| !STANDARD_PORTS.contains(&p));
        let has_double_slash_redirect = components.path.contains("//");
        let path_lower = components.path.to_lowercase();
        let domain_lower = parts.domain.to_lowercase();
        let domain_in_path = self
            .path_brand_tokens
            .iter()
            .any(|brand| path_lower.contains(brand.as_str()) && !domain_lower.contains(brand.as_str()));

        let features = UrlFeatures {
            length,
            entropy: shannon_entropy(&url),
            digits,
            letters,
            special_chars,
            uppercase,
            lowercase,
            digit_ratio: ratio(digits),
            letter_ratio: ratio(letters),
            special_char_ratio: ratio(special_chars),
            has_ip,
            has_punycode,
            has_encoded,
            num_subdomains: parts.subdomain_count(),
            path_length: components.path.chars().count(),
            query_length: components.query.chars().count(),
            fragment_length: components.fragment.chars().count(),
            num_dots: url.matches('.').count(),
            num_hyphens: url.matches('-').count(),
            num_underscores: url.matches('_').count(),
            num_slashes: url.matches('/').count(),
            num_at_symbols: url.matches('@').count(),
            num_params: count_params(components.query),
            has_https: url.starts_with("https://"),
            has_www: hostname.starts_with("www."),
            has_suspicious_port,
            has_double_slash_redirect,
            domain_in_path,
            domain: parts.domain,
            subdomain: parts.subdomain,
            suffix: parts.suffix,
            full_domain: parts.registered_domain,
            url,
        };
        log::trace!(
            "Extracted features for {}: length={}, entropy={}, has_ip={}",
            features.url,
            features.length,
            features.entropy,
            features.has_ip
        );
        features
    }

    /// Extracts the 12-element numeric vector for the tree model.
    ///
    /// See [`UrlFeatures::numeric_vector`] for the frozen layout.
    pub fn numeric_vector(&self, url: &str) -> [f64; NUMERIC_VECTOR_LEN] {
        self.extract(url).numeric_vector()
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
