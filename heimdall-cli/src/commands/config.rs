//! Configuration display

use anyhow::Result;
use heimdall_stores::ConfigLoader;
use std::sync::Arc;

use crate::config::Config;
use crate::render::print_config;

/// Load the configuration document and print it
///
/// A failed load is printed, not returned as an error: the dashboard keeps
/// working without it.
pub async fn show_config(config: &Config) -> Result<()> {
    let loader = ConfigLoader::new(Arc::new(config.client()?));
    print_config(&loader.resolved().await);
    Ok(())
}
