//! Domain registration lookups over RDAP.
//!
//! RDAP is the JSON successor of WHOIS. The registration date comes from the
//! `registration` event and the registrar from the vCard of the entity with
//! the `registrar` role. Unknown domains (HTTP 404) are not an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::DomainAge;
use crate::config::RDAP_API_URL;
use crate::error_handling::IntelError;

/// Registration data for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Registration date, when the registry reports one
    pub creation_date: Option<DateTime<Utc>>,
    /// Registrar name
    pub registrar: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapDomain {
    #[serde(default)]
    events: Vec<RdapEvent>,
    #[serde(default)]
    entities: Vec<RdapEntity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapEvent {
    event_action: String,
    event_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapEntity {
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    vcard_array: Option<Value>,
}

impl RdapEntity {
    /// The `fn` (formatted name) property of a jCard: `["vcard", [[name, params, type, value], ...]]`.
    fn formatted_name(&self) -> Option<String> {
        self.vcard_array
            .as_ref()?
            .get(1)?
            .as_array()?
            .iter()
            .find(|property| property.get(0).and_then(Value::as_str) == Some("fn"))?
            .get(3)?
            .as_str()
            .map(str::to_string)
    }
}

impl From<RdapDomain> for Registration {
    fn from(domain: RdapDomain) -> Self {
        let creation_date = domain
            .events
            .iter()
            .find(|event| event.event_action.eq_ignore_ascii_case("registration"))
            .and_then(|event| parse_date_string(&event.event_date));
        let registrar = domain
            .entities
            .iter()
            .filter(|entity| entity.roles.iter().any(|role| role == "registrar"))
            .find_map(RdapEntity::formatted_name);
        Self {
            creation_date,
            registrar,
        }
    }
}

/// Parses the date formats registries actually return.
fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
    ];
    for format in &formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

/// RDAP client for registration dates.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    client: Client,
    endpoint: String,
}

impl WhoisClient {
    /// Creates a client against the public RDAP bootstrap service.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: RDAP_API_URL.to_string(),
        }
    }

    /// Overrides the endpoint prefix; the domain name is appended to it.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Looks up a registered domain. `Ok(None)` means the registry does not know it.
    pub async fn lookup(&self, domain: &str) -> Result<Option<Registration>, IntelError> {
        let failed = |source: reqwest::Error| IntelError::Registration {
            domain: domain.to_string(),
            source,
        };

        let url = format!("{}{}", self.endpoint, domain);
        let response = self.client.get(&url).send().await.map_err(failed)?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("No registration data for {}", domain);
            return Ok(None);
        }
        let rdap: RdapDomain = response
            .error_for_status()
            .map_err(failed)?
            .json()
            .await
            .map_err(failed)?;
        Ok(Some(rdap.into()))
    }

    /// Age of a domain as of `now`, or `None` when it cannot be determined.
    pub async fn domain_age(&self, domain: &str, now: DateTime<Utc>) -> Option<DomainAge> {
        match self.lookup(domain).await {
            Ok(Some(Registration {
                creation_date: Some(created),
                registrar,
            })) => Some(DomainAge::from_creation_date(created, now).with_registrar(registrar)),
            Ok(_) => {
                log::debug!("Registration date unknown for {}", domain);
                None
            }
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_from_rdap_document() {
        let rdap: RdapDomain = serde_json::from_value(serde_json::json!({
            "events": [
                {"eventAction": "expiration", "eventDate": "2028-08-13T04:00:00Z"},
                {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"}
            ],
            "entities": [
                {"roles": ["abuse"], "vcardArray": ["vcard", [["fn", {}, "text", "Abuse Desk"]]]},
                {"roles": ["registrar"], "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "Example Registrar, Inc."]
                ]]}
            ]
        }))
        .unwrap();

        let registration = Registration::from(rdap);
        assert_eq!(
            registration.creation_date.map(|d| d.to_rfc3339()),
            Some("1995-08-14T04:00:00+00:00".to_string())
        );
        assert_eq!(
            registration.registrar.as_deref(),
            Some("Example Registrar, Inc.")
        );
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let rdap: RdapDomain = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(Registration::from(rdap), Registration::default());
    }

    #[test]
    fn test_parse_date_string_formats() {
        assert!(parse_date_string("2020-01-02T03:04:05Z").is_some());
        assert!(parse_date_string("2020-01-02T03:04:05.123Z").is_some());
        assert!(parse_date_string("2020-01-02").is_some());
        assert!(parse_date_string("02-Jan-2020").is_some());
        assert!(parse_date_string("not a date").is_none());
    }
}
