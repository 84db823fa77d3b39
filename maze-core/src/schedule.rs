//! Round-scoped deferred tasks on a virtual clock.
//!
//! Puzzle engines never sleep. Anything that should happen later (a card
//! flipping back, a reveal window closing, a stopwatch tick) is scheduled on a
//! [`Timeline`] and delivered when the owner advances the clock. Every task is
//! tagged with the round it was scheduled in. Starting a new round makes
//! everything older stale: stale tasks stay queued until their deadline and
//! are then discarded instead of delivered, so they can never touch fresh
//! state.

use std::collections::BTreeMap;
use std::time::Duration;

/// Something driven forward by elapsed time.
///
/// Hosts call [`Clocked::advance`] from their frame loop, or hand the value
/// to [`crate::driver::spawn_clock`] to have it ticked in wall-clock time.
pub trait Clocked {
    /// Move the clock forward by `dt`, firing every task that falls due.
    fn advance(&mut self, dt: Duration);
}

/// Generation counter for a puzzle round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RoundId(pub u64);

/// Handle to a single scheduled task, used to cancel it individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle {
    due: Duration,
    seq: u64,
}

impl TaskHandle {
    /// Virtual time at which the task fires.
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Debug)]
struct Pending<T> {
    round: RoundId,
    task: T,
}

/// A queue of deferred tasks ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    round: RoundId,
    next_seq: u64,
    pending: BTreeMap<TaskHandle, Pending<T>>,
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            round: RoundId::default(),
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The round new tasks are tagged with.
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Number of current-round tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.live().count()
    }

    /// Whether no current-round task is waiting.
    pub fn is_idle(&self) -> bool {
        self.live().next().is_none()
    }

    /// Stale tasks still queued, waiting to be discarded.
    pub fn stale(&self) -> usize {
        self.pending.len() - self.pending()
    }

    fn live(&self) -> impl Iterator<Item = &Pending<T>> + '_ {
        self.pending.values().filter(move |p| p.round == self.round)
    }

    /// Schedule `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle {
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(
            handle,
            Pending {
                round: self.round,
                task,
            },
        );
        handle
    }

    /// Cancel one task. Returns false if it already fired, was dropped, or
    /// belongs to an earlier round.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.pending.get(&handle) {
            Some(pending) if pending.round == self.round => {
                self.pending.remove(&handle);
                true
            }
            _ => false,
        }
    }

    /// Drop every pending task without starting a new round.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Start a new round. Everything scheduled so far becomes stale and
    /// will be discarded when it falls due.
    pub fn next_round(&mut self) -> RoundId {
        let invalidated = self.pending();
        self.round = RoundId(self.round.0 + 1);
        if invalidated > 0 {
            tracing::debug!(round = self.round.0, invalidated, "invalidated previous round");
        }
        self.round
    }

    /// Pop the earliest task due at or before `horizon`.
    ///
    /// The clock moves to the task's deadline before it is returned, so work
    /// the caller schedules while handling it is timed from that instant and
    /// can itself fire before `horizon`. Tasks tagged with an older round are
    /// discarded. Call [`Timeline::settle`] once this returns `None`.
    pub fn pop_due(&mut self, horizon: Duration) -> Option<T> {
        loop {
            let (&handle, _) = self.pending.first_key_value()?;
            if handle.due > horizon {
                return None;
            }
            let pending = self.pending.remove(&handle)?;
            self.now = self.now.max(handle.due);
            if pending.round == self.round {
                return Some(pending.task);
            }
            tracing::debug!(stale = pending.round.0, current = self.round.0, "suppressed stale task");
        }
    }

    /// Finish an advance by moving the clock to `horizon`.
    pub fn settle(&mut self, horizon: Duration) {
        self.now = self.now.max(horizon);
    }

    /// Horizon for an advance of `dt` from now.
    pub fn horizon(&self, dt: Duration) -> Duration {
        self.now + dt
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timeline: &mut Timeline<&'static str>, dt: Duration) -> Vec<&'static str> {
        let horizon = timeline.horizon(dt);
        let mut fired = Vec::new();
        while let Some(task) = timeline.pop_due(horizon) {
            fired.push(task);
        }
        timeline.settle(horizon);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(300), "late");
        timeline.schedule(Duration::from_millis(100), "early");

        assert!(drain(&mut timeline, Duration::from_millis(50)).is_empty());
        assert_eq!(drain(&mut timeline, Duration::from_millis(100)), vec!["early"]);
        assert_eq!(drain(&mut timeline, Duration::from_secs(1)), vec!["late"]);
        assert_eq!(timeline.now(), Duration::from_millis(1150));
    }

    #[test]
    fn test_equal_deadlines_keep_scheduling_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(100), "first");
        timeline.schedule(Duration::from_millis(100), "second");
        timeline.schedule(Duration::from_millis(100), "third");

        assert_eq!(
            drain(&mut timeline, Duration::from_millis(100)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_next_round_suppresses_stale_tasks() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(100), "stale");
        let stale = timeline.schedule(Duration::from_millis(300), "stale late");
        let before = timeline.round();

        let after = timeline.next_round();
        assert!(after > before);
        assert!(timeline.is_idle());
        assert_eq!(timeline.stale(), 2);
        assert!(!timeline.cancel(stale));

        timeline.schedule(Duration::from_millis(200), "fresh");
        assert_eq!(timeline.pending(), 1);
        assert_eq!(drain(&mut timeline, Duration::from_secs(5)), vec!["fresh"]);
        assert_eq!(timeline.stale(), 0);
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_cancel_all_keeps_round() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(100), "a");
        timeline.next_round();
        timeline.schedule(Duration::from_millis(100), "b");
        let round = timeline.round();

        timeline.cancel_all();
        assert_eq!(timeline.round(), round);
        assert_eq!(timeline.stale(), 0);
        assert!(drain(&mut timeline, Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_stale_task_due_first_does_not_block_fresh() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(100), "stale");
        timeline.next_round();
        timeline.schedule(Duration::from_millis(100), "fresh");

        assert_eq!(drain(&mut timeline, Duration::from_millis(100)), vec!["fresh"]);
    }

    #[test]
    fn test_cancel_single_task() {
        let mut timeline = Timeline::new();
        let keep = timeline.schedule(Duration::from_millis(100), "keep");
        let dropped = timeline.schedule(Duration::from_millis(100), "drop");

        assert!(timeline.cancel(dropped));
        assert!(!timeline.cancel(dropped));
        assert_eq!(keep.due(), Duration::from_millis(100));
        assert_eq!(drain(&mut timeline, Duration::from_millis(100)), vec!["keep"]);
    }

    #[test]
    fn test_tasks_scheduled_mid_advance_fire_in_same_window() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(100), 1u32);

        let horizon = timeline.horizon(Duration::from_millis(350));
        let mut fired = Vec::new();
        while let Some(n) = timeline.pop_due(horizon) {
            fired.push(n);
            timeline.schedule(Duration::from_millis(100), n + 1);
        }
        timeline.settle(horizon);

        assert_eq!(fired, vec![1, 2, 3]);
        assert_eq!(timeline.pending(), 1);
    }
}
