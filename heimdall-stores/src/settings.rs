//! Settings store
//!
//! Holds the user's display preferences in memory and writes the whole
//! document to durable storage on every change. Reads never touch storage
//! after the initial load.

use heimdall_core::domain::settings::Settings;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::storage::{Storage, StorageError};
use crate::store::{Store, Subscription};

/// Storage key holding the JSON-encoded settings document
pub const SETTINGS_KEY: &str = "heimdall_settings";

/// Durable, observable preference document
#[derive(Clone)]
pub struct SettingsStore {
    store: Store<Settings>,
    storage: Arc<dyn Storage>,
    write: Arc<Mutex<()>>,
}

impl SettingsStore {
    /// Loads the stored document, falling back to the defaults
    ///
    /// A stored document is merged over the defaults: stored keys win, keys
    /// the store does not know about are kept, and defaults added since the
    /// document was written are filled in. A missing, falsy, unreadable or
    /// corrupt entry yields the defaults.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let initial = load(storage.as_ref());
        Self {
            store: Store::new(initial),
            storage,
            write: Arc::new(Mutex::new(())),
        }
    }

    /// Current document
    pub fn get(&self) -> Settings {
        self.store.get()
    }

    /// Replaces the whole document and persists it
    ///
    /// The in-memory value is updated even if the write fails.
    pub fn set(&self, settings: Settings) -> Result<(), StorageError> {
        self.store.set(settings);
        self.persist()
    }

    /// Applies `f` to the current document and persists the result
    ///
    /// `f` sees the latest document even when other threads are writing.
    pub fn update(&self, f: impl FnOnce(Settings) -> Settings) -> Result<(), StorageError> {
        self.store.update(|current| f(current.clone()));
        self.persist()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Settings) + Send + Sync + 'static,
    ) -> Subscription {
        self.store.subscribe(listener)
    }

    /// Writes the in-memory document, so storage ends up holding the last
    /// value published regardless of which writer persists first
    fn persist(&self) -> Result<(), StorageError> {
        let _write = self.write.lock().unwrap_or_else(PoisonError::into_inner);
        let settings = self.store.get();
        let text = serde_json::to_string(&settings)?;
        self.storage.set(SETTINGS_KEY, &text)?;
        debug!("Persisted {} setting(s)", settings.len());
        Ok(())
    }
}

fn load(storage: &dyn Storage) -> Settings {
    let raw = match storage.get(SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Settings::defaults(),
        Err(e) => {
            warn!("Failed to read stored settings, using defaults: {}", e);
            return Settings::defaults();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Settings::from(map).merged_over_defaults(),
        Ok(value) if is_falsy(&value) => Settings::defaults(),
        Ok(value) => {
            warn!(
                "Stored settings are not an object, using defaults: {}",
                value
            );
            Settings::defaults()
        }
        Err(e) => {
            warn!("Stored settings are corrupt, using defaults: {}", e);
            Settings::defaults()
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
