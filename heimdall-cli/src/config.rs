//! Configuration module
//!
//! Handles CLI configuration: where the API lives, where settings are kept
//! and how long to wait for a response.

use anyhow::{Context, Result};
use heimdall_client::HeimdallClient;
use heimdall_stores::{FileStorage, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the monitoring API
    pub api_url: String,

    /// Directory for the durable settings file
    pub settings_dir: PathBuf,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds an API client honouring the request timeout
    pub fn client(&self) -> Result<HeimdallClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HeimdallClient::with_client(self.api_url.clone(), http))
    }

    /// Opens the settings store backed by `settings_dir`
    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::open(Arc::new(FileStorage::new(self.settings_dir.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_url: "http://localhost:8080".to_string(),
            settings_dir: PathBuf::from(".heimdall"),
            request_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid URL should fail
        config.api_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.api_url = String::new();
        assert!(config.validate().is_err());

        config.api_url = "https://heimdall.internal".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_uses_api_url() {
        let client = config().client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_settings_store_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            settings_dir: dir.path().to_path_buf(),
            ..config()
        };
        assert_eq!(
            config.settings_store().get(),
            heimdall_core::domain::settings::Settings::defaults()
        );
    }
}
