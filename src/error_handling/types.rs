//! Error type definitions.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for predictor configuration.
///
/// These are fatal at construction time. A predictor that would divide by zero
/// or compare against a meaningless threshold is never built.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The three model weights add up to zero.
    #[error("Model weights must sum to a positive value")]
    NoModelWeight,

    /// A single model weight is negative, NaN or infinite.
    #[error("Invalid weight for model '{slot}': {value}")]
    InvalidWeight {
        /// Model slot the weight belongs to
        slot: &'static str,
        /// Offending value
        value: f64,
    },

    /// The phishing threshold is not strictly between 0 and 1.
    #[error("Phishing threshold must be within (0, 1), got {0}")]
    InvalidThreshold(f64),

    /// Reference data file could not be read or parsed.
    #[error("Failed to load reference data from {path}: {source}")]
    ReferenceData {
        /// File that was being loaded
        path: PathBuf,
        /// Underlying read or parse failure
        #[source]
        source: anyhow::Error,
    },
}

/// Error types for a single model query.
///
/// A `ModelError` never aborts a prediction. The failing model is omitted
/// from fusion and the error is logged as a warning.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model reported itself as not loaded or not configured.
    #[error("Model is not available")]
    Unavailable,

    /// The model did not answer within the configured timeout.
    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP request to a remote model failed.
    #[error("Model request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The model answered with something that is not a probability payload.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// The model answered with a value outside [0, 1] (or NaN).
    #[error("Model probability out of range: {0}")]
    OutOfRange(f64),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for auxiliary intelligence lookups.
#[derive(Error, Debug)]
pub enum IntelError {
    /// The Safe Browsing request failed.
    #[error("Safe Browsing request failed: {0}")]
    SafeBrowsing(#[from] ReqwestError),

    /// The configured lookup endpoint is not a valid URL.
    #[error("Invalid intelligence endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The registration data (RDAP) request failed.
    #[error("Registration lookup failed for {domain}: {source}")]
    Registration {
        /// Domain that was looked up
        domain: String,
        /// Underlying HTTP error
        #[source]
        source: ReqwestError,
    },

    /// A DNS query failed for a reason other than "no such record".
    #[error("DNS lookup failed for {domain}: {message}")]
    Dns {
        /// Domain that was queried
        domain: String,
        /// Resolver error text
        message: String,
    },
}
