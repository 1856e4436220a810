//! HTTP inference endpoint client.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ModelSource, PhishingModel};
use crate::error_handling::ModelError;
use crate::features::FeatureExtractor;

/// What a [`RemoteModel`] sends to its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadMode {
    /// `{"url": "..."}`
    #[default]
    Url,
    /// `{"url": "...", "features": [..12 floats..]}` for the tree model
    Features,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Vec<f64>>,
}

#[derive(Deserialize)]
struct InferenceResponse {
    phishing_probability: f64,
}

/// A classifier served over HTTP.
///
/// POSTs JSON to `endpoint` and expects `{"phishing_probability": <float>}`.
/// Non-2xx statuses and malformed bodies are model failures.
#[derive(Debug, Clone)]
pub struct RemoteModel {
    source: ModelSource,
    endpoint: Url,
    client: Client,
    payload: PayloadMode,
    extractor: FeatureExtractor,
}

impl RemoteModel {
    /// Creates a client for one ensemble slot, sending the bare URL.
    pub fn new(source: ModelSource, endpoint: Url, client: Client) -> Self {
        Self {
            source,
            endpoint,
            client,
            payload: PayloadMode::Url,
            extractor: FeatureExtractor::default(),
        }
    }

    /// Sets the payload mode.
    pub fn with_payload(mut self, payload: PayloadMode) -> Self {
        self.payload = payload;
        self
    }

    /// Uses a custom extractor for [`PayloadMode::Features`].
    pub fn with_extractor(mut self, extractor: FeatureExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Endpoint this model posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self, url: &str) -> Result<f64, ModelError> {
        let features = match self.payload {
            PayloadMode::Url => None,
            PayloadMode::Features => Some(self.extractor.numeric_vector(url).to_vec()),
        };
        let body = InferenceRequest { url, features };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let parsed: InferenceResponse = serde_json::from_str(&text).map_err(|e| {
            ModelError::InvalidResponse(format!(
                "{} (first 200 chars: {})",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })?;
        Ok(parsed.phishing_probability)
    }
}

impl PhishingModel for RemoteModel {
    fn source(&self) -> ModelSource {
        self.source
    }

    fn phishing_probability<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<f64, ModelError>> {
        Box::pin(self.request(url))
    }
}
