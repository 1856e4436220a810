//! Static reference data for domain trust evaluation.
//!
//! The built-in tables are a curated sample (major brands, banks, news sites,
//! government portals). Deployments with larger lists (e.g. a full top-sites
//! ranking) load them with [`ReferenceData::from_json_file`]; any table left
//! out of the file keeps its built-in value.
//!
//! Suffixes and TLDs are stored without a leading dot (`"co.uk"`, `"tk"`).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error_handling::ConfigError;

const TOP_SITES: &[&str] = &[
    "google.com", "youtube.com", "facebook.com", "twitter.com",
    "instagram.com", "linkedin.com", "wikipedia.org", "amazon.com",
    "apple.com", "microsoft.com", "netflix.com", "reddit.com",
    "yahoo.com", "tiktok.com", "live.com", "office.com",
    "zoom.us", "bing.com", "microsoftonline.com", "github.com",
];

const HIGH_TRUST_DOMAINS: &[&str] = &[
    // Tech
    "google.com", "google.co.uk", "google.de", "google.fr", "google.es",
    "google.it", "google.ca", "google.com.au", "google.co.jp", "google.com.br",
    "google.co.in", "google.ru", "google.cn", "google.com.tw", "google.com.mx",
    "youtube.com", "gmail.com", "android.com", "chromium.org",
    "microsoft.com", "windows.com", "office.com", "azure.com", "live.com",
    "outlook.com", "bing.com", "linkedin.com", "github.com", "visualstudio.com",
    "apple.com", "icloud.com", "itunes.com",
    "amazon.com", "amazon.co.uk", "amazon.de", "amazon.fr", "amazon.co.jp",
    "amazon.ca", "amazon.com.au", "amazon.in", "aws.amazon.com", "amazonaws.com",
    "facebook.com", "fb.com", "instagram.com", "whatsapp.com", "messenger.com",
    "twitter.com", "x.com",
    "netflix.com", "spotify.com",
    "paypal.com", "ebay.com",
    "adobe.com", "salesforce.com", "oracle.com", "ibm.com", "cisco.com",
    "intel.com", "nvidia.com", "amd.com", "dell.com", "hp.com", "lenovo.com",
    "dropbox.com", "box.com", "zoom.us", "slack.com", "notion.so",
    "cloudflare.com", "fastly.com", "akamai.com",
    // Banks
    "chase.com", "bankofamerica.com", "wellsfargo.com", "citibank.com",
    "usbank.com", "capitalone.com", "pnc.com", "tdbank.com",
    "hsbc.com", "barclays.co.uk", "lloydsbank.com", "natwest.com",
    "deutschebank.de", "bnpparibas.com", "credit-agricole.fr",
    "santander.com", "ing.com", "ubs.com", "credit-suisse.com",
    // E-commerce
    "alibaba.com", "aliexpress.com", "taobao.com", "tmall.com", "jd.com",
    "walmart.com", "target.com", "bestbuy.com",
    "shopify.com", "etsy.com", "rakuten.com", "flipkart.com",
    // News and media
    "cnn.com", "bbc.com", "bbc.co.uk", "nytimes.com", "washingtonpost.com",
    "theguardian.com", "reuters.com", "bloomberg.com", "forbes.com",
    "wsj.com", "ft.com", "economist.com", "time.com", "newsweek.com",
    // Education and reference
    "wikipedia.org", "wikimedia.org", "britannica.com",
    "coursera.org", "edx.org", "udemy.com", "khanacademy.org",
    "mit.edu", "stanford.edu", "harvard.edu", "berkeley.edu", "oxford.ac.uk",
];

const MEDIUM_TRUST_DOMAINS: &[&str] = &[
    "stackoverflow.com", "stackexchange.com", "reddit.com", "quora.com",
    "medium.com", "dev.to", "hackernews.com", "producthunt.com",
    "gitlab.com", "bitbucket.org", "sourceforge.net",
    "npmjs.com", "pypi.org", "rubygems.org", "packagist.org",
    "docker.com", "kubernetes.io", "terraform.io",
    "discord.com", "telegram.org", "signal.org", "skype.com",
    "viber.com", "wechat.com", "line.me",
    "twitch.tv", "vimeo.com", "dailymotion.com", "tiktok.com",
    "soundcloud.com", "bandcamp.com", "deezer.com",
    "imdb.com", "rottentomatoes.com", "metacritic.com",
    "steam.com", "epicgames.com", "ea.com", "ubisoft.com",
    "weather.com", "accuweather.com",
    "indeed.com", "glassdoor.com", "monster.com",
    "airbnb.com", "booking.com", "expedia.com", "tripadvisor.com",
    "uber.com", "lyft.com",
    "baidu.com", "weibo.com", "qq.com", "163.com", "sohu.com",
    "naver.com", "daum.net", "yahoo.co.jp",
    "yandex.ru", "mail.ru", "vk.com",
];

const GOVERNMENT_DOMAINS: &[&str] = &[
    "usa.gov", "whitehouse.gov", "irs.gov", "ssa.gov",
    "gov.uk", "nhs.uk", "dwp.gov.uk",
    "service-public.fr", "gouvernement.fr",
    "bund.de", "bundesregierung.de",
    "gob.mx", "sat.gob.mx",
];

const GOVERNMENT_TLD_PATTERNS: &[&str] = &[
    "gov", "gov.uk", "gov.au", "gov.ca", "gov.in",
    "gov.br", "gov.cn", "gov.jp", "gov.de", "gov.fr",
    "mil", "sa.gov", "mc.gov",
];

const EDUCATIONAL_SUFFIXES: &[&str] = &["edu", "ac.uk", "edu.au", "ac.jp", "edu.cn"];

const HIGH_TRUST_KEYWORDS: &[&str] = &[
    "google", "microsoft", "apple", "amazon", "facebook", "meta",
    "twitter", "netflix", "spotify", "paypal", "ebay",
    "github", "linkedin", "youtube", "instagram", "whatsapp",
];

const MEDIUM_TRUST_KEYWORDS: &[&str] = &[
    "bank", "banking", "finance", "insurance",
    "gov", "government", "official",
    "edu", "university", "college", "school",
    "healthcare", "hospital", "medical", "health",
];

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "signin", "sign-in", "account", "verify", "verification",
    "secure", "security", "update", "confirm", "validate",
    "suspended", "locked", "alert", "urgent", "warning",
    "password", "credential", "authenticate",
    "free", "prize", "winner", "congratulations", "gift",
    "limited", "expire", "act-now", "immediate",
];

const PHISHING_SUBSTRINGS: &[&str] = &[
    "login-", "-login", "signin-", "-signin",
    "account-", "-account", "secure-", "-secure",
    "verify-", "-verify", "update-", "-update",
    "confirm-", "-confirm", "support-", "-support",
    "help-", "-help", "service-", "-service",
];

const SUSPICIOUS_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq",
    "xyz", "top", "work", "click", "link",
    "loan", "men", "party", "racing", "review",
];

const TLD_PENALTIES: &[(&str, f64)] = &[
    ("tk", 0.4), ("ml", 0.4), ("ga", 0.4), ("cf", 0.4), ("gq", 0.4),
    ("xyz", 0.2), ("top", 0.2), ("work", 0.15), ("click", 0.25),
    ("link", 0.15), ("loan", 0.3), ("men", 0.25), ("party", 0.2),
];

const TRUSTED_TLDS: &[&str] = &["com", "org", "net", "edu", "gov"];

const PATH_BRAND_TOKENS: &[&str] = &[
    "google", "facebook", "apple", "microsoft", "amazon",
    "paypal", "ebay", "netflix", "instagram", "twitter",
    "linkedin", "yahoo", "outlook", "banking", "bank",
];

fn set_of(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn list_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reference tables consumed by the feature extractor and the trust evaluator.
///
/// Domain sets are unordered; keyword lists are ordered because the order in
/// which they are scanned determines the order of the reported reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Top global websites (highest base trust)
    pub top_sites: HashSet<String>,
    /// Well-known brands, banks and media
    pub high_trust_domains: HashSet<String>,
    /// Popular but smaller sites
    pub medium_trust_domains: HashSet<String>,
    /// Explicit government registered domains
    pub government_domains: HashSet<String>,
    /// Government suffix patterns, matched on label boundaries
    pub government_tld_patterns: Vec<String>,
    /// Educational public suffixes
    pub educational_suffixes: HashSet<String>,
    /// Brand names that raise trust when they form the domain label
    pub high_trust_keywords: Vec<String>,
    /// Sector words that slightly raise trust
    pub medium_trust_keywords: Vec<String>,
    /// Pretext words that are penalized next to a trust keyword
    pub suspicious_keywords: Vec<String>,
    /// Hyphenated fragments typical of phishing hostnames
    pub phishing_substrings: Vec<String>,
    /// TLDs with elevated abuse rates
    pub suspicious_tlds: HashSet<String>,
    /// Per-TLD penalty for entries of `suspicious_tlds`
    pub tld_penalties: HashMap<String, f64>,
    /// TLDs that earn a small trust bonus
    pub trusted_tlds: HashSet<String>,
    /// Brand tokens checked in URL paths by the feature extractor
    pub path_brand_tokens: Vec<String>,
    /// Additional operator-trusted domains, merged into the high-trust set
    pub extra_trusted_domains: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            top_sites: set_of(TOP_SITES),
            high_trust_domains: set_of(HIGH_TRUST_DOMAINS),
            medium_trust_domains: set_of(MEDIUM_TRUST_DOMAINS),
            government_domains: set_of(GOVERNMENT_DOMAINS),
            government_tld_patterns: list_of(GOVERNMENT_TLD_PATTERNS),
            educational_suffixes: set_of(EDUCATIONAL_SUFFIXES),
            high_trust_keywords: list_of(HIGH_TRUST_KEYWORDS),
            medium_trust_keywords: list_of(MEDIUM_TRUST_KEYWORDS),
            suspicious_keywords: list_of(SUSPICIOUS_KEYWORDS),
            phishing_substrings: list_of(PHISHING_SUBSTRINGS),
            suspicious_tlds: set_of(SUSPICIOUS_TLDS),
            tld_penalties: TLD_PENALTIES
                .iter()
                .map(|(tld, penalty)| (tld.to_string(), *penalty))
                .collect(),
            trusted_tlds: set_of(TRUSTED_TLDS),
            path_brand_tokens: list_of(PATH_BRAND_TOKENS),
            extra_trusted_domains: Vec::new(),
        }
    }
}

impl ReferenceData {
    /// Loads reference data from a JSON file.
    ///
    /// Every table missing from the file keeps its built-in default, so a file
    /// containing only `{"extra_trusted_domains": ["intranet.example"]}` is valid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReferenceData` if the file cannot be read or is not
    /// valid JSON for this structure.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load = || -> anyhow::Result<Self> {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let data: Self = serde_json::from_str(&raw).context("Invalid reference data JSON")?;
            Ok(data.normalized())
        };
        load().map_err(|source| ConfigError::ReferenceData {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lowercases every entry and strips leading dots from suffix tables.
    ///
    /// Applied to loaded files so hand-written tables like `".TK"` behave like
    /// the built-in ones.
    pub fn normalized(self) -> Self {
        let lower_set = |set: HashSet<String>| -> HashSet<String> {
            set.into_iter()
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .collect()
        };
        let lower_list = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .collect()
        };
        Self {
            top_sites: lower_set(self.top_sites),
            high_trust_domains: lower_set(self.high_trust_domains),
            medium_trust_domains: lower_set(self.medium_trust_domains),
            government_domains: lower_set(self.government_domains),
            government_tld_patterns: lower_list(self.government_tld_patterns),
            educational_suffixes: lower_set(self.educational_suffixes),
            // Keyword fragments keep their hyphens ("-login"), so only lowercase them
            high_trust_keywords: self
                .high_trust_keywords
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            medium_trust_keywords: self
                .medium_trust_keywords
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            suspicious_keywords: self
                .suspicious_keywords
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            phishing_substrings: self
                .phishing_substrings
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            suspicious_tlds: lower_set(self.suspicious_tlds),
            tld_penalties: self
                .tld_penalties
                .into_iter()
                .map(|(tld, penalty)| (tld.trim_start_matches('.').to_lowercase(), penalty))
                .collect(),
            trusted_tlds: lower_set(self.trusted_tlds),
            path_brand_tokens: self
                .path_brand_tokens
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
            extra_trusted_domains: lower_list(self.extra_trusted_domains),
        }
    }

    /// Penalty for a suspicious TLD, falling back to the default for unlisted ones.
    pub fn tld_penalty(&self, suffix: &str) -> f64 {
        self.tld_penalties
            .get(suffix)
            .copied()
            .unwrap_or(crate::config::DEFAULT_TLD_PENALTY)
    }
}
