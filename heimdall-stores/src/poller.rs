//! Job poller
//!
//! Keeps a continuously refreshed snapshot of the remote job list and fans it
//! out to every subscriber.
//!
//! Failure policy: a failed fetch is only shown when there is nothing else to
//! show. Once a non-empty list has been published, failures are dropped
//! silently and the last good list stays on screen until the next success.
//!
//! Teardown policy: when the last subscriber leaves, the polling timer is
//! cancelled. Subscribing again does not restart it; call
//! [`JobPoller::set_interval`] with a positive value to resume.
//!
//! Fetches are not sequenced. If a round-trip takes longer than the interval,
//! two fetches can be in flight at once and whichever resolves last wins.

use heimdall_client::JobSource;
use heimdall_core::domain::interval::IntervalValue;
use heimdall_core::domain::job::{FetchFailure, JobSnapshot};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::scheduler::{Scheduler, Tick, TimerHandle};
use crate::store::{Store, Subscription};

/// Whether a failed fetch should replace the current snapshot
///
/// Only when no jobs are currently shown.
pub fn should_surface_failure(current: &JobSnapshot) -> bool {
    current.items.is_empty()
}

/// Shared, polling view of the remote job list
///
/// Cloning yields another handle to the same poller.
#[derive(Clone)]
pub struct JobPoller {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn JobSource>,
    scheduler: Arc<dyn Scheduler>,
    runtime: Handle,
    store: Store<JobSnapshot>,
    timer: Mutex<Option<TimerHandle>>,
}

impl JobPoller {
    /// Creates a poller and immediately starts the first fetch
    ///
    /// No timer is scheduled until [`set_interval`](Self::set_interval) is
    /// called.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(source: Arc<dyn JobSource>, scheduler: Arc<dyn Scheduler>) -> Self {
        let inner = Arc::new(Inner {
            source,
            scheduler,
            runtime: Handle::current(),
            store: Store::new(JobSnapshot::default()),
            timer: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        inner.store.on_idle(move || {
            if let Some(inner) = weak.upgrade() {
                debug!("Last job subscriber left, stopping polling");
                inner.clear_timer();
            }
        });

        let poller = Self { inner };
        poller.spawn_fetch();
        poller
    }

    /// Current snapshot
    pub fn snapshot(&self) -> JobSnapshot {
        self.inner.store.get()
    }

    /// Subscribes to snapshots, starting with the current one
    pub fn subscribe(
        &self,
        listener: impl Fn(&JobSnapshot) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.store.subscriber_count()
    }

    /// Whether a polling timer is currently scheduled
    pub fn is_polling(&self) -> bool {
        self.inner.lock_timer().is_some()
    }

    /// Fetches the job list once and publishes the outcome
    ///
    /// Success always replaces the snapshot. Failure replaces it only if
    /// [`should_surface_failure`] says so; otherwise nothing is published.
    pub async fn fetch_and_publish(&self) {
        self.inner.fetch_and_publish().await;
    }

    /// Reconfigures the polling cadence
    ///
    /// Accepts whole seconds as a number or a numeric string. Any existing
    /// timer is cancelled first. A positive value schedules a fetch every
    /// `value` seconds, the first one a full interval from now. Zero,
    /// negative or non-numeric values leave polling off.
    pub fn set_interval(&self, value: impl Into<IntervalValue>) {
        let value = value.into();
        let mut timer = self.inner.lock_timer();

        if let Some(previous) = timer.take() {
            previous.cancel();
        }

        match value.seconds() {
            Some(secs) if secs > 0 => {
                let weak = Arc::downgrade(&self.inner);
                let tick: Tick = Arc::new(move || Inner::tick(&weak));
                let period = Duration::from_secs(secs.unsigned_abs());
                *timer = Some(self.inner.scheduler.schedule_every(period, tick));
                info!("Polling jobs every {}s", secs);
            }
            _ => {
                info!("Job polling disabled (interval {:?})", value);
            }
        }
    }

    fn spawn_fetch(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            inner.fetch_and_publish().await;
        });
    }
}

impl Inner {
    async fn fetch_and_publish(&self) {
        match self.source.fetch_jobs().await {
            Ok(items) => {
                debug!("Fetched {} job(s)", items.len());
                self.store.set(JobSnapshot::loaded(items));
            }
            Err(e) => {
                let failure = FetchFailure::from_error(&e);
                let surfaced = self.store.update_if(|current| {
                    should_surface_failure(current)
                        .then(|| JobSnapshot::failed(current.items.clone(), failure))
                });
                if surfaced.is_none() {
                    debug!("Keeping last good job list after failed fetch: {}", e);
                }
            }
        }
    }

    fn tick(weak: &Weak<Inner>) {
        if let Some(inner) = weak.upgrade() {
            let runtime = inner.runtime.clone();
            runtime.spawn(async move {
                inner.fetch_and_publish().await;
            });
        }
    }

    fn clear_timer(&self) {
        if let Some(timer) = self.lock_timer().take() {
            timer.cancel();
        }
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<TimerHandle>> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
