//! Live job view
//!
//! Wires the stores together: the `refreshInterval` preference drives the
//! poller's cadence, and every published snapshot is rendered.

use anyhow::Result;
use chrono::Local;
use colored::*;
use heimdall_stores::{JobPoller, TokioScheduler};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::render::{View, print_snapshot};

/// Render the job list until interrupted
pub async fn watch_jobs(config: &Config, interval: Option<i64>) -> Result<()> {
    let settings = config.settings_store();
    let poller = JobPoller::new(
        Arc::new(config.client()?),
        Arc::new(TokioScheduler::current()),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _jobs = poller.subscribe(move |snapshot| {
        let _ = tx.send(snapshot.clone());
    });

    // An explicit --interval pins the cadence; otherwise follow the preference
    let _interval_sync = match interval {
        Some(secs) => {
            poller.set_interval(secs);
            None
        }
        None => {
            let target = poller.clone();
            Some(settings.subscribe(move |prefs| {
                target.set_interval(prefs.refresh_interval());
            }))
        }
    };

    info!("Watching jobs at {} (Ctrl+C to stop)", config.api_url);

    loop {
        tokio::select! {
            Some(snapshot) = rx.recv() => {
                let view = View::from_settings(&settings.get());
                println!(
                    "{}",
                    format!("── {} ", Local::now().format("%H:%M:%S")).dimmed()
                );
                print_snapshot(&snapshot, &view);
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    Ok(())
}
