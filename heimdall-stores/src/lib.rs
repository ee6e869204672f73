//! Heimdall Stores
//!
//! Client-side data layer for the Heimdall dashboard: three independent,
//! observable stores that keep the UI supplied with remote and persisted
//! state.
//!
//! Architecture:
//! - [`JobPoller`]: periodically refreshed job list that keeps showing the
//!   last good data through transient failures
//! - [`ConfigLoader`]: one-shot fetch of the configuration document
//! - [`SettingsStore`]: user preferences, written through to durable storage
//!
//! Supporting pieces:
//! - [`store`]: the observable value all three are built on
//! - [`scheduler`]: injectable timers so polling can be driven by hand in tests
//! - [`storage`]: durable key-value backends
//!
//! The stores do not know about each other. Feeding the `refreshInterval`
//! preference into [`JobPoller::set_interval`] is the caller's job.

pub mod config_loader;
pub mod poller;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config_loader::ConfigLoader;
pub use poller::{JobPoller, should_surface_failure};
pub use scheduler::{MAX_PERIOD, ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use settings::{SETTINGS_KEY, SettingsStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{Store, Subscription};
