//! Hand-driven scheduler for tests
//!
//! Time only moves when [`ManualScheduler::advance`] is called. Ticks fire
//! in due-time order on the calling thread.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use super::{MAX_PERIOD, Scheduler, Tick, TimerHandle};

/// Scheduler with a virtual clock
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

struct ManualTimer {
    id: u64,
    period: Duration,
    next_due: Duration,
    tick: Tick,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of timers that have not been cancelled
    pub fn active_timers(&self) -> usize {
        self.lock().timers.len()
    }

    /// Moves the clock forward, firing every tick that falls due on the way
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now.saturating_add(by);

        loop {
            let tick = {
                let mut guard = self.lock();
                let state = &mut *guard;
                let due = state
                    .timers
                    .iter_mut()
                    .filter(|timer| timer.next_due <= target)
                    .min_by_key(|timer| (timer.next_due, timer.id));

                match due {
                    Some(timer) => {
                        let fired_at = timer.next_due;
                        timer.next_due = timer.next_due.saturating_add(timer.period);
                        let tick = Arc::clone(&timer.tick);
                        state.now = fired_at;
                        tick
                    }
                    None => break,
                }
            };

            tick();
        }

        self.lock().now = target;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&self, period: Duration, tick: Tick) -> TimerHandle {
        if period.is_zero() {
            return TimerHandle::new(|| {});
        }

        let period = period.min(MAX_PERIOD);
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            let next_due = state.now.saturating_add(period);
            state.timers.push(ManualTimer {
                id,
                period,
                next_due,
                tick,
            });
            id
        };

        let state: Weak<Mutex<ManualState>> = Arc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .timers
                    .retain(|timer| timer.id != id);
            }
        })
    }
}
