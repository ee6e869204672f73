//! Configuration loader
//!
//! Fetches the `/config` document exactly once and exposes the outcome as a
//! [`ConfigResult`]. There is no retry: a failed load stays failed until a new
//! loader is built.

use heimdall_client::ConfigSource;
use heimdall_core::domain::config::ConfigResult;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info};

use crate::store::{Store, Subscription};

/// One-shot, observable configuration document
#[derive(Clone)]
pub struct ConfigLoader {
    store: Store<ConfigResult>,
}

impl ConfigLoader {
    /// Creates the loader and starts its only fetch
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        let store = Store::new(ConfigResult::Unresolved);
        let pending = PendingLoad {
            store: store.clone(),
            settled: false,
        };

        Handle::current().spawn(async move {
            pending.run(source.as_ref()).await;
        });

        Self { store }
    }

    /// Current value, `Unresolved` until the fetch settles
    pub fn get(&self) -> ConfigResult {
        self.store.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&ConfigResult) + Send + Sync + 'static,
    ) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Waits for the fetch to settle and returns the terminal value
    ///
    /// Always returns: a fetch task that panics or is dropped settles as
    /// failed.
    pub async fn resolved(&self) -> ConfigResult {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = self.store.subscribe(move |value: &ConfigResult| {
            if value.is_settled() {
                let _ = tx.send(value.clone());
            }
        });

        rx.recv().await.unwrap_or_default()
    }
}

/// The only fetch of a loader, publishing its outcome exactly once
///
/// If the task is dropped before the fetch settles (the source panicked or
/// the runtime shut down), the loader is marked failed.
struct PendingLoad {
    store: Store<ConfigResult>,
    settled: bool,
}

impl PendingLoad {
    async fn run(mut self, source: &dyn ConfigSource) {
        let result = match source.fetch_config().await {
            Ok(doc) => {
                info!("Configuration loaded");
                ConfigResult::Resolved(doc)
            }
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                ConfigResult::failed()
            }
        };
        self.settle(result);
    }

    fn settle(&mut self, result: ConfigResult) {
        self.settled = true;
        self.store.set(result);
    }
}

impl Drop for PendingLoad {
    fn drop(&mut self) {
        if !self.settled {
            error!("Failed to load configuration: fetch ended without a result");
            self.settle(ConfigResult::failed());
        }
    }
}
