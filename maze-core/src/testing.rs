//! Testing utilities for the maze.
//!
//! This module provides tools for integration testing:
//! - Solvers that drive each engine to its solved state the way a player would
//! - `JourneyHarness` for scripted play-throughs of a whole mood path
//! - Assertion helpers for verifying session state

use crate::config::MazeConfig;
use crate::journey::{JourneyError, JourneyRunner, JourneySummary, Step};
use crate::mood::Mood;
use crate::puzzles::{
    CardId, CheckOutcome, PairPuzzle, PatternPuzzle, Puzzle, SequencePuzzle, TimingPuzzle,
};
use crate::schedule::Clocked;
use crate::session::MazeSession;
use std::collections::HashMap;
use std::time::Duration;

/// Select the target colors in order.
pub fn solve_sequence(puzzle: &mut SequencePuzzle) {
    puzzle.reset_selection();
    for color in puzzle.target().to_vec() {
        puzzle.select(color);
    }
}

/// Flip each pair together and wait out the match delay after each.
pub fn solve_pairs(puzzle: &mut PairPuzzle, config: &MazeConfig) {
    puzzle.advance(config.timings.mismatch_delay);

    let mut by_symbol: HashMap<_, Vec<CardId>> = HashMap::new();
    for card in puzzle.cards().iter().filter(|c| !c.matched) {
        by_symbol.entry(card.symbol).or_default().push(card.id);
    }
    for ids in by_symbol.values() {
        for &id in ids {
            puzzle.flip(id);
        }
        puzzle.advance(config.timings.match_delay);
    }
}

/// Wait for the reveal to end, copy the target and check.
pub fn solve_pattern(puzzle: &mut PatternPuzzle, config: &MazeConfig) -> CheckOutcome {
    let wait = config
        .timings
        .reveal
        .iter()
        .chain([&config.timings.review_window])
        .max()
        .copied()
        .unwrap_or_default();
    puzzle.advance(wait);

    let target = puzzle.target().to_vec();
    for (i, lit) in target.into_iter().enumerate() {
        if puzzle.user_pattern()[i] != lit {
            puzzle.toggle_cell(i);
        }
    }
    puzzle.check()
}

/// Run the stopwatch for exactly the target and stop.
pub fn solve_timing(puzzle: &mut TimingPuzzle, config: &MazeConfig) {
    puzzle.start();
    let remaining = (puzzle.target_seconds() * 10).saturating_sub(puzzle.elapsed_tenths());
    puzzle.advance(config.timings.tick * remaining);
    puzzle.stop();
}

/// Solve whichever engine this is.
pub fn solve(puzzle: &mut Puzzle, config: &MazeConfig) {
    match puzzle {
        Puzzle::Sequence(p) => solve_sequence(p),
        Puzzle::Pairs(p) => solve_pairs(p, config),
        Puzzle::Pattern(p) => {
            solve_pattern(p, config);
        }
        Puzzle::Timing(p) => solve_timing(p, config),
    }
}

/// Test harness for playing a mood path end to end.
pub struct JourneyHarness {
    /// The session being written.
    pub session: MazeSession,
    /// The runner for the current journey.
    pub runner: JourneyRunner,
    config: MazeConfig,
}

impl JourneyHarness {
    /// Begin a seeded journey on `mood`.
    pub fn new(mood: Mood) -> Self {
        Self::with_config(mood, MazeConfig::new().with_seed(7))
    }

    pub fn with_config(mood: Mood, config: MazeConfig) -> Self {
        let mut session = MazeSession::new();
        let runner = JourneyRunner::begin(&mut session, mood, config.clone());
        Self {
            session,
            runner,
            config,
        }
    }

    /// Solve the current puzzle and record it.
    pub fn solve_current(&mut self) -> &mut Self {
        if let Some(puzzle) = self.runner.puzzle_mut() {
            solve(puzzle, &self.config);
        }
        self.runner.sync(&mut self.session);
        self
    }

    /// Move to the next step.
    pub fn next(&mut self) -> Result<Step, JourneyError> {
        self.runner.next(&mut self.session)
    }

    /// Let time pass on the current puzzle.
    pub fn wait(&mut self, dt: Duration) -> &mut Self {
        self.runner.advance(dt);
        self
    }

    /// Solve every remaining puzzle and land on the summary.
    pub fn play_through(&mut self) -> Result<JourneySummary, JourneyError> {
        while !self.runner.is_complete() {
            self.solve_current();
            self.next()?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> JourneySummary {
        JourneySummary::from_session(&self.session)
    }

    pub fn puzzles_solved(&self) -> u32 {
        self.session.puzzles_solved()
    }

    pub fn last_event(&self) -> Option<&str> {
        self.session.journey().last().map(String::as_str)
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the solved counter.
#[track_caller]
pub fn assert_solved_count(harness: &JourneyHarness, expected: u32) {
    let actual = harness.puzzles_solved();
    assert_eq!(
        actual, expected,
        "Expected {expected} puzzles solved, got {actual}"
    );
}

/// Assert the journey log is exactly `expected`.
#[track_caller]
pub fn assert_journey(harness: &JourneyHarness, expected: &[&str]) {
    assert_eq!(
        harness.session.journey(),
        expected,
        "Journey log did not match"
    );
}

/// Assert the runner is on the given step.
#[track_caller]
pub fn assert_step(harness: &JourneyHarness, expected: Step) {
    let actual = harness.runner.step();
    assert_eq!(actual, expected, "Expected step {expected:?}, got {actual:?}");
}
