//! MazeSession - the state of one play-through.
//!
//! Holds the chosen mood, the append-only journey log, and the solved
//! counter. The host owns exactly one session and passes it by reference to
//! whatever needs it; puzzle engines never see it. Every operation is
//! synchronous and total.

use crate::mood::Mood;
use crate::selector::Slot;
use serde::{Deserialize, Serialize};

/// State for one play-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MazeSession {
    mood: Option<Mood>,
    journey: Vec<String>,
    puzzles_solved: u32,
}

impl MazeSession {
    /// An empty session: no mood, no events, nothing solved.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mood, or `None` before one is chosen.
    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = Some(mood);
    }

    /// The journey log in the order events were recorded.
    pub fn journey(&self) -> &[String] {
        &self.journey
    }

    /// Append an event to the end of the journey.
    pub fn add_journey_event(&mut self, event: impl Into<String>) {
        self.journey.push(event.into());
    }

    pub fn puzzles_solved(&self) -> u32 {
        self.puzzles_solved
    }

    /// Bump the solved counter.
    ///
    /// Prefer [`MazeSession::record_solved`], which also logs the event.
    pub fn increment_puzzles_solved(&mut self) {
        self.puzzles_solved += 1;
    }

    /// Log "Solved <mood> puzzle <slot>" and bump the counter together.
    pub fn record_solved(&mut self, mood: Mood, slot: Slot) {
        self.add_journey_event(format!("Solved {} puzzle {}", mood.tag(), slot));
        self.increment_puzzles_solved();
    }

    /// Clear mood, journey and counter together.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// An owned copy of the session for display or export.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mood: self.mood,
            journey: self.journey.clone(),
            puzzles_solved: self.puzzles_solved,
        }
    }
}

/// Serializable view of a [`MazeSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mood: Option<Mood>,
    pub journey: Vec<String>,
    pub puzzles_solved: u32,
}
