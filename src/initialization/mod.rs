//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources used by
//! the binary and by embedding services:
//! - Logger (plain or JSON)
//! - HTTP client for inference endpoints and Safe Browsing
//! - DNS resolver for the auxiliary DNS checks

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
