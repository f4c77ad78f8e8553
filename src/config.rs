//! Base URL configuration for the ledger node.
//!
//! Resolution order: `CHAINBOARD_API_URL` env var, then
//! `~/.chainboard/config.yaml`, then the built-in default.

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{API_URL_ENV, DEFAULT_API_URL};

/// Dashboard configuration. Only the node base URL for now.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
        }
    }
}

impl Config {
    /// Resolve the effective configuration. Never fatal: a missing or
    /// unreadable config file falls back to defaults.
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                return Config { api_url: url };
            }
        }

        match Self::load_from(&Self::config_path()) {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read config file, using defaults");
                Config::default()
            }
        }
    }

    /// Load from an explicit path. Returns Ok(None) when the file is absent.
    pub fn load_from(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chainboard")
            .join("config.yaml")
    }

    /// Join a request path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_url: http://node.example:9000\n").unwrap();
        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.api_url, "http://node.example:9000");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = Config {
            api_url: String::from("http://localhost:8000/"),
        };
        assert_eq!(
            config.endpoint("/blockchain/status"),
            "http://localhost:8000/blockchain/status"
        );
        assert_eq!(config.endpoint("mine"), "http://localhost:8000/mine");
    }
}
