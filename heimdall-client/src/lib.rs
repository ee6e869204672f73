//! Heimdall HTTP Client
//!
//! A small, typed HTTP client for the Heimdall job-monitoring API.
//!
//! The client covers the two endpoints the dashboard reads:
//! - `GET {base}/jobs`: the current list of jobs
//! - `GET {base}/config`: the dashboard configuration document
//!
//! The stores never call the client directly; they fetch through the
//! [`JobSource`] and [`ConfigSource`] traits, which the client implements.
//!
//! # Example
//!
//! ```no_run
//! use heimdall_client::HeimdallClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HeimdallClient::new("http://localhost:8080");
//!
//!     let jobs = client.list_jobs().await?;
//!     println!("Found {} job(s)", jobs.len());
//!     Ok(())
//! }
//! ```

mod config;
pub mod error;
mod jobs;
pub mod source;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use source::{ConfigSource, JobSource};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Heimdall monitoring API
#[derive(Debug, Clone)]
pub struct HeimdallClient {
    /// Base URL of the API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HeimdallClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use heimdall_client::HeimdallClient;
    ///
    /// let client = HeimdallClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use heimdall_client::HeimdallClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HeimdallClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET against `{base}{path}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an error if the request failed,
    /// otherwise deserializes the response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HeimdallClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HeimdallClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = HeimdallClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
