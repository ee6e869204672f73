//! Configuration endpoint

use crate::HeimdallClient;
use crate::error::Result;

impl HeimdallClient {
    /// Fetch the dashboard configuration document
    ///
    /// The document is returned untouched; its shape belongs to the server.
    pub async fn get_config(&self) -> Result<serde_json::Value> {
        self.get_json("/config").await
    }
}
