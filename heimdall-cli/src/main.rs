//! Heimdall CLI
//!
//! Terminal dashboard for the Heimdall job-monitoring API.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "heimdall")]
#[command(about = "Heimdall Flink job dashboard", long_about = None)]
struct Cli {
    /// Monitoring API URL
    #[arg(long, env = "HEIMDALL_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Directory holding the persisted display settings
    #[arg(long, env = "HEIMDALL_SETTINGS_DIR", default_value = ".heimdall")]
    settings_dir: PathBuf,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HEIMDALL_REQUEST_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heimdall_cli=info,heimdall_stores=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        settings_dir: cli.settings_dir,
        request_timeout: Duration::from_secs(cli.timeout),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
