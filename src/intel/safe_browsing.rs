//! Google Safe Browsing v4 lookups.

use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SAFE_BROWSING_API_URL;
use crate::error_handling::IntelError;

const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

/// Safe Browsing result for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeBrowsingVerdict {
    /// URL that was checked
    pub url: String,
    /// At least one threat list matched
    pub is_malicious: bool,
    /// Matched threat types, e.g. `SOCIAL_ENGINEERING`
    pub threats: Vec<String>,
}

impl SafeBrowsingVerdict {
    fn clean(url: &str) -> Self {
        Self {
            url: url.to_string(),
            is_malicious: false,
            threats: Vec::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    client: ClientInfo,
    threat_info: ThreatInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo {
    client_id: &'static str,
    client_version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatInfo<'a> {
    threat_types: &'static [&'static str],
    platform_types: [&'static str; 1],
    threat_entry_types: [&'static str; 1],
    threat_entries: Vec<ThreatEntry<'a>>,
}

#[derive(Serialize)]
struct ThreatEntry<'a> {
    url: &'a str,
}

#[derive(Deserialize, Default)]
struct FindResponse {
    #[serde(default)]
    matches: Vec<ThreatMatch>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreatMatch {
    threat_type: String,
    threat: MatchedEntry,
}

#[derive(Deserialize)]
struct MatchedEntry {
    url: String,
}

/// Client for the `threatMatches:find` endpoint.
///
/// Disabled when no API key is configured; a disabled client reports every
/// URL as clean without making a request.
#[derive(Debug, Clone)]
pub struct SafeBrowsingClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SafeBrowsingClient {
    /// Creates a client. An empty key disables it.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            log::warn!("Safe Browsing API key not configured, lookups disabled");
        }
        Self {
            client,
            api_key,
            endpoint: SAFE_BROWSING_API_URL.to_string(),
        }
    }

    /// Overrides the lookup endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether an API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Checks several URLs in one request.
    ///
    /// # Errors
    ///
    /// Returns `IntelError::SafeBrowsing` if the request fails or the response
    /// is not valid JSON, `IntelError::InvalidEndpoint` for a malformed endpoint. Use [`check_url`](Self::check_url) for fail-open checks.
    pub async fn find_threats(&self, urls: &[&str]) -> Result<Vec<SafeBrowsingVerdict>, IntelError> {
        let Some(api_key) = &self.api_key else {
            return Ok(urls.iter().map(|url| SafeBrowsingVerdict::clean(url)).collect());
        };

        let mut endpoint = Url::parse(&self.endpoint)?;
        endpoint.query_pairs_mut().append_pair("key", api_key);

        let body = FindRequest {
            client: ClientInfo {
                client_id: env!("CARGO_PKG_NAME"),
                client_version: env!("CARGO_PKG_VERSION"),
            },
            threat_info: ThreatInfo {
                threat_types: &THREAT_TYPES,
                platform_types: ["ANY_PLATFORM"],
                threat_entry_types: ["URL"],
                threat_entries: urls.iter().map(|url| ThreatEntry { url }).collect(),
            },
        };

        let response: FindResponse = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut threats: HashMap<String, Vec<String>> = HashMap::new();
        for found in response.matches {
            threats.entry(found.threat.url).or_default().push(found.threat_type);
        }

        Ok(urls
            .iter()
            .map(|url| {
                let found = threats.get(*url).cloned().unwrap_or_default();
                SafeBrowsingVerdict {
                    url: url.to_string(),
                    is_malicious: !found.is_empty(),
                    threats: found,
                }
            })
            .collect())
    }

    /// Checks one URL, reporting it clean if the lookup fails.
    pub async fn check_url(&self, url: &str) -> SafeBrowsingVerdict {
        match self.find_threats(&[url]).await {
            Ok(mut verdicts) => verdicts
                .pop()
                .unwrap_or_else(|| SafeBrowsingVerdict::clean(url)),
            Err(e) => {
                log::error!("Safe Browsing lookup failed for {}: {}", url, e);
                SafeBrowsingVerdict::clean(url)
            }
        }
    }
}
