//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default weights, thresholds, timeouts)
//! - Predictor configuration and log option types
//! - Static reference data (trusted domains, keyword lists, TLD penalties)

mod constants;
mod reference;
mod types;

// Re-export all constants
pub use constants::*;
pub use reference::ReferenceData;
pub use types::{LogFormat, LogLevel, PredictorConfig};
