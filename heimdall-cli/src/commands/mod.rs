//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod config;
mod jobs;
mod settings;
mod watch;

pub use settings::SettingsCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List jobs once
    Jobs {
        /// Page to show (defaults to the `currentPage` setting)
        #[arg(long)]
        page: Option<usize>,
    },
    /// Keep the job list on screen, refreshing on the configured interval
    Watch {
        /// Refresh interval in seconds (defaults to the `refreshInterval` setting)
        #[arg(long)]
        interval: Option<i64>,
    },
    /// Show the dashboard configuration served by the API
    Config,
    /// Display preferences
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Jobs { page } => jobs::list_jobs(config, page).await,
        Commands::Watch { interval } => watch::watch_jobs(config, interval).await,
        Commands::Config => config::show_config(config).await,
        Commands::Settings { command } => settings::handle_settings_command(command, config),
    }
}
