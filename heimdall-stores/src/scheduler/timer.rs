//! Tokio-backed scheduler

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{MAX_PERIOD, Scheduler, Tick, TimerHandle};

/// Runs each timer as a tokio task driven by `tokio::time::interval_at`
///
/// Because it uses tokio's clock, tests can pause and advance time with
/// `#[tokio::test(start_paused = true)]`.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Creates a scheduler spawning onto the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Creates a scheduler spawning onto the current runtime
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_every(&self, period: Duration, tick: Tick) -> TimerHandle {
        if period.is_zero() {
            return TimerHandle::new(|| {});
        }

        let period = period.min(MAX_PERIOD);
        let _enter = self.runtime.enter();
        let start = Instant::now() + period;
        let task = self.runtime.spawn(async move {
            let mut ticker = time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tick();
            }
        });

        TimerHandle::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_tick() -> (Arc<AtomicUsize>, Tick) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let tick: Tick = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (count, tick)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let scheduler = TokioScheduler::current();
        let (count, tick) = counting_tick();

        let _timer = scheduler.schedule_every(Duration::from_secs(10), tick);

        time::sleep(Duration::from_millis(9_900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let scheduler = TokioScheduler::current();
        let (count, tick) = counting_tick();

        let timer = scheduler.schedule_every(Duration::from_secs(5), tick);
        time::sleep(Duration::from_millis(5_100)).await;
        timer.cancel();
        time::sleep(Duration::from_secs(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_period_is_clamped() {
        let scheduler = TokioScheduler::current();
        let (count, tick) = counting_tick();

        let _timer = scheduler.schedule_every(Duration::from_secs(u64::MAX), tick);

        time::sleep(MAX_PERIOD - Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
