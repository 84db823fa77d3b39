//! JourneyRunner - walks a mood path one puzzle at a time.
//!
//! The runner is the only writer of [`MazeSession`]. It resolves each slot
//! through the selector, builds the engine, watches for the solved signal,
//! records it, and moves on. The session is passed in explicitly on every
//! call that writes to it.
//!
//! ```ignore
//! use maze_core::{JourneyRunner, JourneySummary, MazeConfig, MazeSession, Mood, Step};
//!
//! let mut session = MazeSession::new();
//! let mut runner = JourneyRunner::begin(&mut session, Mood::Calm, MazeConfig::new());
//!
//! // ... feed input to runner.puzzle_mut() and time to runner.advance() ...
//!
//! if runner.sync(&mut session) {
//!     match runner.next(&mut session)? {
//!         Step::Puzzle(slot) => println!("On to puzzle {slot}"),
//!         Step::Summary => println!("{}", JourneySummary::from_session(&session).headline()),
//!     }
//! }
//! ```

use crate::config::MazeConfig;
use crate::mood::Mood;
use crate::puzzles::Puzzle;
use crate::schedule::Clocked;
use crate::selector::{self, InvalidSlot, PuzzleSpec, Slot, TOTAL_SLOTS};
use crate::session::MazeSession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

/// Errors from JourneyRunner operations.
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("Puzzle {0} has not been solved yet")]
    NotSolved(Slot),

    #[error("The journey is already complete")]
    Complete,

    #[error(transparent)]
    InvalidSlot(#[from] InvalidSlot),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the player goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Puzzle(Slot),
    Summary,
}

/// Drives one mood path from the first puzzle to the summary.
#[derive(Debug)]
pub struct JourneyRunner {
    mood: Mood,
    config: MazeConfig,
    slot: Slot,
    puzzle: Option<Puzzle>,
    recorded: BTreeSet<Slot>,
}

impl JourneyRunner {
    /// Start a new journey: reset the session, set the mood, log the start,
    /// and open the first puzzle.
    pub fn begin(session: &mut MazeSession, mood: Mood, config: MazeConfig) -> Self {
        session.reset();
        session.set_mood(mood);
        session.add_journey_event(format!("Started {} journey", mood.tag()));
        tracing::info!(%mood, "journey started");

        let mut runner = Self {
            mood,
            config,
            slot: Slot::FIRST,
            puzzle: None,
            recorded: BTreeSet::new(),
        };
        runner.open(Slot::FIRST);
        runner
    }

    /// Jump to a slot, replacing the current puzzle.
    ///
    /// The old engine is dropped along with anything it had scheduled. A slot
    /// that was already recorded stays recorded: solving it again does not
    /// count a second time.
    pub fn open_slot(&mut self, slot: u8) -> Result<PuzzleSpec, JourneyError> {
        let slot = Slot::new(slot)?;
        Ok(self.open(slot))
    }

    fn open(&mut self, slot: Slot) -> PuzzleSpec {
        let spec = selector::select(self.mood, slot);
        let config = self.config.derive(u64::from(slot.get()));
        self.puzzle = Some(Puzzle::new(spec.kind, spec.difficulty, &config));
        self.slot = slot;
        tracing::debug!(mood = %self.mood, %slot, kind = %spec.kind, difficulty = %spec.difficulty, "opened puzzle");
        spec
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// The slot currently open (or the last one, once complete).
    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn step(&self) -> Step {
        if self.is_complete() {
            Step::Summary
        } else {
            Step::Puzzle(self.slot)
        }
    }

    /// What the current slot runs.
    pub fn spec(&self) -> PuzzleSpec {
        selector::select(self.mood, self.slot)
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn puzzle_mut(&mut self) -> Option<&mut Puzzle> {
        self.puzzle.as_mut()
    }

    pub fn is_complete(&self) -> bool {
        self.puzzle.is_none()
    }

    /// Whether the current puzzle's solve has been written to the session.
    pub fn is_recorded(&self) -> bool {
        self.recorded.contains(&self.slot)
    }

    /// Record the current puzzle in the session if it has just been solved.
    ///
    /// Returns true when a record was written. Each slot is recorded at most
    /// once per journey, so this is safe to call after every input.
    pub fn sync(&mut self, session: &mut MazeSession) -> bool {
        if !self.current_solved() || self.recorded.contains(&self.slot) {
            return false;
        }
        session.record_solved(self.mood, self.slot);
        self.recorded.insert(self.slot);
        tracing::info!(mood = %self.mood, slot = %self.slot, "puzzle solved");
        true
    }

    fn current_solved(&self) -> bool {
        self.puzzle.as_ref().is_some_and(Puzzle::is_solved)
    }

    /// Move on from a solved puzzle to the next slot or the summary.
    pub fn next(&mut self, session: &mut MazeSession) -> Result<Step, JourneyError> {
        if self.is_complete() {
            return Err(JourneyError::Complete);
        }
        self.sync(session);
        if !self.current_solved() {
            return Err(JourneyError::NotSolved(self.slot));
        }

        match self.slot.next() {
            Some(slot) => {
                self.open(slot);
                Ok(Step::Puzzle(slot))
            }
            None => {
                self.puzzle = None;
                tracing::info!(mood = %self.mood, solved = session.puzzles_solved(), "journey complete");
                Ok(Step::Summary)
            }
        }
    }

    /// Leave the journey: drop the active puzzle and reset the session.
    pub fn abandon(mut self, session: &mut MazeSession) {
        self.puzzle = None;
        session.reset();
        tracing::info!(mood = %self.mood, "journey abandoned");
    }
}

impl Clocked for JourneyRunner {
    fn advance(&mut self, dt: Duration) {
        if let Some(puzzle) = self.puzzle.as_mut() {
            puzzle.advance(dt);
        }
    }
}

/// End-of-journey view built from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub mood: Option<Mood>,
    pub events: Vec<String>,
    pub puzzles_solved: u32,
    pub total_puzzles: u8,
    pub description: String,
    pub style: Option<String>,
}

impl JourneySummary {
    pub fn from_session(session: &MazeSession) -> Self {
        let mood = session.mood();
        Self {
            mood,
            events: session.journey().to_vec(),
            puzzles_solved: session.puzzles_solved(),
            total_puzzles: TOTAL_SLOTS,
            description: mood
                .map(|m| m.journey_description())
                .unwrap_or("Your journey through the Mood Maze has been completed.")
                .to_string(),
            style: mood.map(|m| m.problem_solving_style().to_string()),
        }
    }

    /// One-line reading of the journey.
    pub fn headline(&self) -> String {
        match (self.mood, &self.style) {
            (Some(mood), Some(style)) => format!(
                "Based on your journey, you seem to thrive in {} environments. Your problem-solving style is {}.",
                mood.tag(),
                style
            ),
            _ => self.description.clone(),
        }
    }

    /// Whether every puzzle on the path was solved.
    pub fn is_complete(&self) -> bool {
        self.puzzles_solved >= u32::from(self.total_puzzles)
    }

    /// Pretty JSON for sharing.
    pub fn to_json(&self) -> Result<String, JourneyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
