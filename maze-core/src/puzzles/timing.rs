//! Perfect timing puzzle.
//!
//! The player is given a target number of seconds, starts a stopwatch, and
//! stops it as close to the target as they can. The stopwatch counts in
//! tenths of a second. Stopping within the difficulty's tolerance solves the
//! puzzle; otherwise the player can start again and the stopwatch resumes
//! from where it stopped.

use super::Difficulty;
use crate::config::{MazeConfig, Timings};
use crate::schedule::{Clocked, TaskHandle, Timeline};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Range the target is drawn from, in whole seconds.
pub fn target_range(difficulty: Difficulty) -> RangeInclusive<u32> {
    match difficulty {
        Difficulty::Easy => 5..=10,
        Difficulty::Medium => 8..=15,
        Difficulty::Hard => 12..=20,
    }
}

/// Allowed error as a percentage of the target.
pub fn tolerance_percent(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 20,
        Difficulty::Medium => 15,
        Difficulty::Hard => 10,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingFeedback {
    Perfect,
    TooEarly,
    TooLate,
}

impl TimingFeedback {
    pub fn message(&self) -> &'static str {
        match self {
            TimingFeedback::Perfect => "Perfect timing! You nailed it!",
            TimingFeedback::TooEarly => "Too early! Try again.",
            TimingFeedback::TooLate => "Too late! Try again.",
        }
    }
}

/// Outcome of one stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingResult {
    pub feedback: TimingFeedback,
    /// Seconds away from the target.
    pub difference: f64,
    /// `100 * (1 - difference / target)`, floored at 0 and rounded.
    pub accuracy: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimingTask {
    Tick,
}

#[derive(Debug)]
pub struct TimingPuzzle {
    difficulty: Difficulty,
    timings: Timings,
    rng: StdRng,
    timeline: Timeline<TimingTask>,
    tick: Option<TaskHandle>,
    target_seconds: u32,
    elapsed_tenths: u32,
    running: bool,
    attempts: u32,
    last_result: Option<TimingResult>,
    solved: bool,
}

impl TimingPuzzle {
    /// Start a puzzle with default settings and OS randomness.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, &MazeConfig::default())
    }

    pub fn with_config(difficulty: Difficulty, config: &MazeConfig) -> Self {
        let mut puzzle = Self::blank(difficulty, config);
        puzzle.reset_round();
        puzzle
    }

    /// Start a puzzle with a fixed target instead of a random one.
    ///
    /// A zero target is raised to the bottom of the difficulty's range.
    pub fn with_target(difficulty: Difficulty, target_seconds: u32, config: &MazeConfig) -> Self {
        let mut puzzle = Self::blank(difficulty, config);
        puzzle.target_seconds = if target_seconds == 0 {
            *target_range(difficulty).start()
        } else {
            target_seconds
        };
        puzzle
    }

    fn blank(difficulty: Difficulty, config: &MazeConfig) -> Self {
        Self {
            difficulty,
            timings: config.timings.clone(),
            rng: config.rng(),
            timeline: Timeline::new(),
            tick: None,
            target_seconds: *target_range(difficulty).start(),
            elapsed_tenths: 0,
            running: false,
            attempts: 0,
            last_result: None,
            solved: false,
        }
    }

    /// Draw a new target and stop and zero the stopwatch.
    pub fn new_target(&mut self) {
        if self.solved {
            tracing::debug!("timing puzzle already solved, ignoring new target");
            return;
        }
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.timeline.next_round();
        self.tick = None;
        self.target_seconds = self.rng.gen_range(target_range(self.difficulty));
        self.running = false;
        self.elapsed_tenths = 0;
        self.last_result = None;
        tracing::debug!(difficulty = %self.difficulty, target = self.target_seconds, "new timing target");
    }

    /// Start the stopwatch. Ignored while running and once solved.
    pub fn start(&mut self) {
        if self.solved || self.running {
            return;
        }
        self.running = true;
        self.tick = Some(self.timeline.schedule(self.timings.tick_interval(), TimingTask::Tick));
    }

    /// Stop the stopwatch and score the attempt.
    ///
    /// Returns `None` if it was not running.
    pub fn stop(&mut self) -> Option<TimingResult> {
        if !self.running {
            return None;
        }
        self.running = false;
        if let Some(tick) = self.tick.take() {
            self.timeline.cancel(tick);
        }
        self.attempts += 1;

        let target_tenths = self.target_seconds * 10;
        let diff_tenths = self.elapsed_tenths.abs_diff(target_tenths);
        let within = diff_tenths * 100 <= target_tenths * tolerance_percent(self.difficulty);

        let feedback = if within {
            self.solved = true;
            tracing::debug!(attempts = self.attempts, "timing solved");
            TimingFeedback::Perfect
        } else if self.elapsed_tenths < target_tenths {
            TimingFeedback::TooEarly
        } else {
            TimingFeedback::TooLate
        };

        let difference = diff_tenths as f64 / 10.0;
        let accuracy = (100.0 * (1.0 - difference / self.target_seconds as f64))
            .max(0.0)
            .round() as u32;

        let result = TimingResult {
            feedback,
            difference,
            accuracy,
        };
        self.last_result = Some(result);
        Some(result)
    }

    fn apply(&mut self, task: TimingTask) {
        match task {
            TimingTask::Tick => {
                self.elapsed_tenths += 1;
                self.tick = Some(self.timeline.schedule(self.timings.tick_interval(), TimingTask::Tick));
            }
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target_seconds(&self) -> u32 {
        self.target_seconds
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_tenths as f64 / 10.0
    }

    pub fn elapsed_tenths(&self) -> u32 {
        self.elapsed_tenths
    }

    pub fn tolerance_fraction(&self) -> f64 {
        tolerance_percent(self.difficulty) as f64 / 100.0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_result(&self) -> Option<TimingResult> {
        self.last_result
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

impl Clocked for TimingPuzzle {
    fn advance(&mut self, dt: Duration) {
        let horizon = self.timeline.horizon(dt);
        while let Some(task) = self.timeline.pop_due(horizon) {
            self.apply(task);
        }
        self.timeline.settle(horizon);
    }
}
