//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL for the ledger node API
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL
pub const API_URL_ENV: &str = "CHAINBOARD_API_URL";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "chainboard";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
