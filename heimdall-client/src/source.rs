//! Fetch seams used by the stores
//!
//! The stores only need "give me the jobs" and "give me the config". Keeping
//! those behind traits lets tests script responses without a server.

use async_trait::async_trait;
use heimdall_core::domain::job::JobSummary;

use crate::HeimdallClient;
use crate::error::Result;

/// Something that can produce the current job list
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<JobSummary>>;
}

/// Something that can produce the configuration document
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch_config(&self) -> Result<serde_json::Value>;
}

#[async_trait]
impl JobSource for HeimdallClient {
    async fn fetch_jobs(&self) -> Result<Vec<JobSummary>> {
        self.list_jobs().await
    }
}

#[async_trait]
impl ConfigSource for HeimdallClient {
    async fn fetch_config(&self) -> Result<serde_json::Value> {
        self.get_config().await
    }
}
