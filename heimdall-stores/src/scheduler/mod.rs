//! Timer scheduling
//!
//! The job poller never touches a clock directly. It asks a [`Scheduler`] to
//! run a tick every N seconds and keeps the returned [`TimerHandle`] so it
//! can cancel it later. Production code uses [`TokioScheduler`]; tests drive
//! time by hand with [`ManualScheduler`].

pub mod manual;
pub mod timer;

pub use manual::ManualScheduler;
pub use timer::TokioScheduler;

use std::sync::Arc;
use std::time::Duration;

/// Callback run on every tick
pub type Tick = Arc<dyn Fn() + Send + Sync>;

/// Longest period a scheduler honours; longer periods are clamped to it
pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Schedules repeating work
pub trait Scheduler: Send + Sync {
    /// Runs `tick` every `period`, first one full period after this call
    ///
    /// A zero period never fires. Periods above [`MAX_PERIOD`] run at
    /// `MAX_PERIOD`.
    fn schedule_every(&self, period: Duration, tick: Tick) -> TimerHandle;
}

/// A live repeating timer
///
/// Cancelling (or dropping) the handle stops future ticks. Work already
/// started by a previous tick is not affected.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl TimerHandle {
    /// Wraps the function that tears the timer down
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops the timer
    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}
