//! One-shot job listing

use anyhow::{Context, Result};

use crate::config::Config;
use crate::render::{View, print_jobs};

/// Fetch the job list once and print the configured page
pub async fn list_jobs(config: &Config, page: Option<usize>) -> Result<()> {
    let client = config.client()?;
    let settings = config.settings_store().get();

    let mut view = View::from_settings(&settings);
    if let Some(page) = page {
        view.page = page;
    }

    let jobs = client
        .list_jobs()
        .await
        .with_context(|| format!("Failed to fetch jobs from {}", client.base_url()))?;

    print_jobs(&jobs, &view);
    Ok(())
}
