//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::INTEL_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// User agent sent to inference endpoints and lookup services.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initializes the shared HTTP client for model endpoints and lookups.
///
/// `timeout` bounds a whole request. Model calls are additionally wrapped in
/// the predictor's own per-model timeout.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot be set up.
pub fn init_client(timeout: Duration) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(INTEL_TIMEOUT_SECS).min(timeout))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
