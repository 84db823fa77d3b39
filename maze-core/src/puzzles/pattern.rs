//! Pattern recall puzzle.
//!
//! A square grid lights up a random set of cells for a few seconds, then goes
//! dark. The player toggles cells to reproduce it and asks for a check. A
//! wrong check shows the target again briefly without clearing the player's
//! grid.

use super::Difficulty;
use crate::config::{MazeConfig, Timings};
use crate::schedule::{Clocked, Timeline};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chance that any one target cell is lit.
pub const ACTIVE_PROBABILITY: f64 = 0.4;

/// Grid side length.
pub fn grid_side(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 4,
        Difficulty::Hard => 5,
    }
}

/// Result of [`PatternPuzzle::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    Correct,
    Incorrect,
    /// The target was on screen or the puzzle was already solved.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternTask {
    HideTarget,
}

#[derive(Debug)]
pub struct PatternPuzzle {
    difficulty: Difficulty,
    timings: Timings,
    rng: StdRng,
    timeline: Timeline<PatternTask>,
    target: Vec<bool>,
    user: Vec<bool>,
    revealing: bool,
    attempts: u32,
    last_outcome: Option<CheckOutcome>,
    solved: bool,
}

impl PatternPuzzle {
    /// Start a puzzle with default settings and OS randomness.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, &MazeConfig::default())
    }

    pub fn with_config(difficulty: Difficulty, config: &MazeConfig) -> Self {
        let mut puzzle = Self {
            difficulty,
            timings: config.timings.clone(),
            rng: config.rng(),
            timeline: Timeline::new(),
            target: Vec::new(),
            user: Vec::new(),
            revealing: false,
            attempts: 0,
            last_outcome: None,
            solved: false,
        };
        puzzle.generate();
        puzzle
    }

    /// Draw a new target and show it, cancelling any pending reveal timeout.
    pub fn new_round(&mut self) {
        if self.solved {
            tracing::debug!("pattern puzzle already solved, ignoring new round");
            return;
        }
        self.generate();
    }

    fn generate(&mut self) {
        self.timeline.next_round();

        let cells = self.total_cells();
        self.target = (0..cells)
            .map(|_| self.rng.gen_bool(ACTIVE_PROBABILITY))
            .collect();
        self.user = vec![false; cells];
        self.attempts = 0;
        self.last_outcome = None;
        self.show_target(self.timings.reveal_duration(self.difficulty));
        tracing::debug!(difficulty = %self.difficulty, cells, "new pattern");
    }

    fn show_target(&mut self, window: Duration) {
        self.revealing = true;
        self.timeline.schedule(window, PatternTask::HideTarget);
    }

    /// Toggle one cell of the player's grid.
    ///
    /// Ignored while the target is shown, for indices outside the grid, and
    /// once solved.
    pub fn toggle_cell(&mut self, index: usize) {
        if self.solved || self.revealing {
            return;
        }
        match self.user.get_mut(index) {
            Some(cell) => *cell = !*cell,
            None => tracing::debug!(index, "cell out of range"),
        }
    }

    /// Compare the player's grid with the target.
    ///
    /// A mismatch shows the target again for the review window and keeps the
    /// player's grid as it is.
    pub fn check(&mut self) -> CheckOutcome {
        if self.solved || self.revealing {
            return CheckOutcome::Ignored;
        }
        self.attempts += 1;

        let outcome = if self.user == self.target {
            self.solved = true;
            tracing::debug!(attempts = self.attempts, "pattern solved");
            CheckOutcome::Correct
        } else {
            self.show_target(self.timings.review_window);
            CheckOutcome::Incorrect
        };
        self.last_outcome = Some(outcome);
        outcome
    }

    fn apply(&mut self, task: PatternTask) {
        match task {
            PatternTask::HideTarget => self.revealing = false,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn side(&self) -> usize {
        grid_side(self.difficulty)
    }

    pub fn total_cells(&self) -> usize {
        self.side() * self.side()
    }

    pub fn target(&self) -> &[bool] {
        &self.target
    }

    pub fn user_pattern(&self) -> &[bool] {
        &self.user
    }

    /// The grid a host should draw right now.
    pub fn visible(&self) -> &[bool] {
        if self.revealing {
            &self.target
        } else {
            &self.user
        }
    }

    /// Whether the target is on screen and input is locked.
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_outcome(&self) -> Option<CheckOutcome> {
        self.last_outcome
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

impl Clocked for PatternPuzzle {
    fn advance(&mut self, dt: Duration) {
        let horizon = self.timeline.horizon(dt);
        while let Some(task) = self.timeline.pop_due(horizon) {
            self.apply(task);
        }
        self.timeline.settle(horizon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(difficulty: Difficulty) -> PatternPuzzle {
        PatternPuzzle::with_config(difficulty, &MazeConfig::new().with_seed(21))
    }

    fn copy_target(p: &mut PatternPuzzle) {
        let target = p.target().to_vec();
        for (i, lit) in target.into_iter().enumerate() {
            if p.user_pattern()[i] != lit {
                p.toggle_cell(i);
            }
        }
    }

    /// Make the player's grid differ from the target in cell 0.
    fn break_pattern(p: &mut PatternPuzzle) {
        copy_target(p);
        p.toggle_cell(0);
    }

    #[test]
    fn test_grid_sizes() {
        assert_eq!(puzzle(Difficulty::Easy).total_cells(), 9);
        assert_eq!(puzzle(Difficulty::Medium).total_cells(), 16);
        assert_eq!(puzzle(Difficulty::Hard).total_cells(), 25);
    }

    #[test]
    fn test_reveal_window_per_difficulty() {
        for (difficulty, ms) in [
            (Difficulty::Easy, 3000),
            (Difficulty::Medium, 2500),
            (Difficulty::Hard, 2000),
        ] {
            let mut p = puzzle(difficulty);
            assert!(p.is_revealing());
            p.advance(Duration::from_millis(ms - 1));
            assert!(p.is_revealing());
            p.advance(Duration::from_millis(1));
            assert!(!p.is_revealing());
        }
    }

    #[test]
    fn test_toggle_ignored_while_revealing() {
        let mut p = puzzle(Difficulty::Easy);
        p.toggle_cell(0);
        assert!(p.user_pattern().iter().all(|&c| !c));
        assert_eq!(p.visible(), p.target());
    }

    #[test]
    fn test_double_toggle_restores_cell() {
        let mut p = puzzle(Difficulty::Medium);
        p.advance(Duration::from_secs(3));
        for i in 0..p.total_cells() {
            let before = p.user_pattern()[i];
            p.toggle_cell(i);
            assert_ne!(p.user_pattern()[i], before);
            p.toggle_cell(i);
            assert_eq!(p.user_pattern()[i], before);
        }
    }

    #[test]
    fn test_toggle_out_of_range_ignored() {
        let mut p = puzzle(Difficulty::Easy);
        p.advance(Duration::from_secs(3));
        p.toggle_cell(9);
        assert_eq!(p.user_pattern().len(), 9);
        assert!(p.user_pattern().iter().all(|&c| !c));
    }

    #[test]
    fn test_correct_check_solves() {
        let mut p = puzzle(Difficulty::Hard);
        p.advance(Duration::from_secs(2));
        copy_target(&mut p);

        assert_eq!(p.check(), CheckOutcome::Correct);
        assert!(p.is_solved());
        assert_eq!(p.attempts(), 1);
    }

    #[test]
    fn test_wrong_check_reviews_target_and_keeps_grid() {
        let mut p = puzzle(Difficulty::Easy);
        p.advance(Duration::from_secs(3));
        break_pattern(&mut p);
        let guess = p.user_pattern().to_vec();

        assert_eq!(p.check(), CheckOutcome::Incorrect);
        assert!(p.is_revealing());
        assert_eq!(p.check(), CheckOutcome::Ignored);
        assert_eq!(p.attempts(), 1);

        p.advance(Duration::from_millis(1500));
        assert!(!p.is_revealing());
        assert_eq!(p.user_pattern(), guess.as_slice());

        p.toggle_cell(0);
        assert_eq!(p.check(), CheckOutcome::Correct);
        assert_eq!(p.attempts(), 2);
    }

    #[test]
    fn test_check_ignored_during_initial_reveal() {
        let mut p = puzzle(Difficulty::Easy);
        assert_eq!(p.check(), CheckOutcome::Ignored);
        assert_eq!(p.attempts(), 0);
    }

    #[test]
    fn test_new_round_cancels_stale_hide() {
        let mut p = puzzle(Difficulty::Hard);
        p.advance(Duration::from_millis(1500));
        p.new_round();

        // The first round's hide was due at 2.0s; the new one at 3.5s.
        p.advance(Duration::from_millis(600));
        assert!(p.is_revealing());
        p.advance(Duration::from_millis(1400));
        assert!(!p.is_revealing());
    }

    #[test]
    fn test_active_probability_roughly_forty_percent() {
        let mut lit = 0;
        let mut total = 0;
        let mut p = puzzle(Difficulty::Hard);
        for _ in 0..200 {
            p.new_round();
            lit += p.target().iter().filter(|&&c| c).count();
            total += p.total_cells();
        }
        let ratio = lit as f64 / total as f64;
        assert!((0.35..0.45).contains(&ratio), "ratio was {ratio}");
    }
}
