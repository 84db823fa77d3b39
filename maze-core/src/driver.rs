//! Real-time clock for async hosts.
//!
//! Engines only move forward when something calls
//! [`Clocked::advance`](crate::schedule::Clocked::advance). Hosts running on
//! tokio can hand a shared engine (or a whole
//! [`JourneyRunner`](crate::journey::JourneyRunner)) to [`spawn_clock`] and
//! let a background task feed it wall-clock time.

use crate::config::MIN_TICK;
use crate::schedule::Clocked;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Handle to a running clock task. Dropping it stops the clock.
#[derive(Debug)]
pub struct ClockHandle {
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Stop the clock now.
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that advances `target` by the elapsed time every `tick`.
///
/// The lock is held only for the duration of each advance, so the host can
/// feed input between ticks. Must be called from inside a tokio runtime.
pub fn spawn_clock<C>(target: Arc<Mutex<C>>, tick: Duration) -> ClockHandle
where
    C: Clocked + Send + 'static,
{
    let tick = tick.max(MIN_TICK);
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();

        loop {
            interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last);
            last = now;
            if !dt.is_zero() {
                target.lock().await.advance(dt);
            }
        }
    });
    tracing::debug!(tick_ms = tick.as_millis() as u64, "clock started");
    ClockHandle { task }
}
