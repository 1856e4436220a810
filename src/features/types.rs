//! Feature record produced by the URL feature extractor.

use serde::{Deserialize, Serialize};

use crate::config::NUMERIC_VECTOR_LEN;

/// Structural and statistical features of one URL.
///
/// Computed fresh per request and never mutated. Field names are part of the
/// reporting contract and match the keys consumers already parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFeatures {
    /// Normalized URL (trimmed, scheme added when missing)
    pub url: String,
    /// Length in characters
    pub length: usize,
    /// Shannon entropy of the lowercased URL, rounded to 6 decimals
    pub entropy: f64,

    // Character counts
    /// Numeric characters
    pub digits: usize,
    /// Alphabetic characters
    pub letters: usize,
    /// Non-alphanumeric characters
    pub special_chars: usize,
    /// Uppercase characters
    pub uppercase: usize,
    /// Lowercase characters
    pub lowercase: usize,

    // Ratios to length, rounded to 4 decimals
    /// `digits / length`
    pub digit_ratio: f64,
    /// `letters / length`
    pub letter_ratio: f64,
    /// `special_chars / length`
    pub special_char_ratio: f64,

    // Structure
    /// Host is a literal dotted-quad IPv4 address
    pub has_ip: bool,
    /// Host contains the punycode marker `xn--`
    pub has_punycode: bool,
    /// Path or query contains a `%XX` escape
    pub has_encoded: bool,
    /// Number of labels in the subdomain
    pub num_subdomains: usize,
    /// Length of the raw path
    pub path_length: usize,
    /// Length of the raw query string
    pub query_length: usize,
    /// Length of the raw fragment
    pub fragment_length: usize,

    // Domain
    /// Registrable label (`google` in `www.google.co.uk`)
    pub domain: String,
    /// Subdomain labels (`www`)
    pub subdomain: String,
    /// Public suffix (`co.uk`)
    pub suffix: String,
    /// Registered domain (`google.co.uk`)
    pub full_domain: String,

    // Character occurrences
    /// `.` count
    pub num_dots: usize,
    /// `-` count
    pub num_hyphens: usize,
    /// `_` count
    pub num_underscores: usize,
    /// `/` count
    pub num_slashes: usize,
    /// `@` count
    pub num_at_symbols: usize,
    /// Distinct query parameters with a value
    pub num_params: usize,
    /// Scheme is https
    pub has_https: bool,
    /// Host starts with `www.`
    pub has_www: bool,

    // Suspicious patterns
    /// Explicit port outside {80, 443, 8080}
    pub has_suspicious_port: bool,
    /// Path contains `//`
    pub has_double_slash_redirect: bool,
    /// A brand token appears in the path but not in the domain label
    pub domain_in_path: bool,
}

impl UrlFeatures {
    /// Fixed-order numeric vector consumed by the gradient-boosted tree model.
    ///
    /// Layout: `[length, entropy, digits, special_chars, has_ip, length,
    /// entropy, letters, has_punycode, has_encoded, num_subdomains,
    /// path_length]`.
    ///
    /// Positions 5 and 6 repeat length and entropy. The trained model expects
    /// exactly this input schema; reordering or deduplicating it requires
    /// retraining.
    pub fn numeric_vector(&self) -> [f64; NUMERIC_VECTOR_LEN] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [
            self.length as f64,
            self.entropy,
            self.digits as f64,
            self.special_chars as f64,
            flag(self.has_ip),
            self.length as f64,
            self.entropy,
            self.letters as f64,
            flag(self.has_punycode),
            flag(self.has_encoded),
            self.num_subdomains as f64,
            self.path_length as f64,
        ]
    }
}
