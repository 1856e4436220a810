//! Error handling.
//!
//! This module provides the error types used throughout the library:
//! - Configuration errors, rejected eagerly when a predictor is built
//! - Model errors, recovered locally by omitting the failing model
//! - Initialization errors for the logger, HTTP client and DNS resolver
//! - Intelligence lookup errors for the auxiliary third-party checks
//!
//! Nothing in this module is allowed to escape `EnsemblePredictor::predict`;
//! model failures are folded into `ModelOutcome::Unavailable` instead.

mod types;

// Re-export public API
pub use types::{ConfigError, InitializationError, IntelError, ModelError};
