//! The four puzzle engines.
//!
//! Each engine is a small state machine that owns its own round state and a
//! [`Timeline`](crate::schedule::Timeline) of deferred transitions. Engines
//! never touch the session; the only thing they expose outward is
//! [`Puzzle::is_solved`], which flips from false to true exactly once.
//!
//! Input on a solved engine is ignored, as is input that names a card, cell
//! or color the engine does not have.

pub mod pairs;
pub mod pattern;
pub mod sequence;
pub mod timing;

pub use pairs::{Card, CardId, PairPuzzle, Symbol};
pub use pattern::{CheckOutcome, PatternPuzzle};
pub use sequence::{Color, SequenceFeedback, SequencePuzzle};
pub use timing::{TimingFeedback, TimingPuzzle, TimingResult};

use crate::config::MazeConfig;
use crate::schedule::Clocked;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Puzzle difficulty, increasing along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which engine a puzzle slot runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    /// Reproduce a color order.
    Sequence,
    /// Find the matching card pairs.
    Pairs,
    /// Recall a briefly shown grid.
    Pattern,
    /// Stop a hidden stopwatch on target.
    Timing,
}

impl PuzzleKind {
    pub fn all() -> [PuzzleKind; 4] {
        [
            PuzzleKind::Sequence,
            PuzzleKind::Pairs,
            PuzzleKind::Pattern,
            PuzzleKind::Timing,
        ]
    }

    /// Player-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            PuzzleKind::Sequence => "Color Sequence",
            PuzzleKind::Pairs => "Memory Pairs",
            PuzzleKind::Pattern => "Pattern Recall",
            PuzzleKind::Timing => "Perfect Timing",
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One active puzzle of any kind.
///
/// Dropping a `Puzzle` drops its timeline, cancelling anything it had
/// scheduled.
#[derive(Debug)]
pub enum Puzzle {
    Sequence(SequencePuzzle),
    Pairs(PairPuzzle),
    Pattern(PatternPuzzle),
    Timing(TimingPuzzle),
}

impl Puzzle {
    /// Build and start the engine for `kind`.
    pub fn new(kind: PuzzleKind, difficulty: Difficulty, config: &MazeConfig) -> Self {
        match kind {
            PuzzleKind::Sequence => Puzzle::Sequence(SequencePuzzle::with_config(difficulty, config)),
            PuzzleKind::Pairs => Puzzle::Pairs(PairPuzzle::with_config(difficulty, config)),
            PuzzleKind::Pattern => Puzzle::Pattern(PatternPuzzle::with_config(difficulty, config)),
            PuzzleKind::Timing => Puzzle::Timing(TimingPuzzle::with_config(difficulty, config)),
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            Puzzle::Sequence(_) => PuzzleKind::Sequence,
            Puzzle::Pairs(_) => PuzzleKind::Pairs,
            Puzzle::Pattern(_) => PuzzleKind::Pattern,
            Puzzle::Timing(_) => PuzzleKind::Timing,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Puzzle::Sequence(p) => p.difficulty(),
            Puzzle::Pairs(p) => p.difficulty(),
            Puzzle::Pattern(p) => p.difficulty(),
            Puzzle::Timing(p) => p.difficulty(),
        }
    }

    /// The solved signal. Monotonic: never returns to false.
    pub fn is_solved(&self) -> bool {
        match self {
            Puzzle::Sequence(p) => p.is_solved(),
            Puzzle::Pairs(p) => p.is_solved(),
            Puzzle::Pattern(p) => p.is_solved(),
            Puzzle::Timing(p) => p.is_solved(),
        }
    }

    /// Regenerate the current round (new colors, deck, pattern or target).
    pub fn restart(&mut self) {
        match self {
            Puzzle::Sequence(p) => p.new_round(),
            Puzzle::Pairs(p) => p.new_game(),
            Puzzle::Pattern(p) => p.new_round(),
            Puzzle::Timing(p) => p.new_target(),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut SequencePuzzle> {
        match self {
            Puzzle::Sequence(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pairs_mut(&mut self) -> Option<&mut PairPuzzle> {
        match self {
            Puzzle::Pairs(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pattern_mut(&mut self) -> Option<&mut PatternPuzzle> {
        match self {
            Puzzle::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_timing_mut(&mut self) -> Option<&mut TimingPuzzle> {
        match self {
            Puzzle::Timing(p) => Some(p),
            _ => None,
        }
    }
}

impl Clocked for Puzzle {
    fn advance(&mut self, dt: Duration) {
        match self {
            Puzzle::Sequence(_) => {}
            Puzzle::Pairs(p) => p.advance(dt),
            Puzzle::Pattern(p) => p.advance(dt),
            Puzzle::Timing(p) => p.advance(dt),
        }
    }
}
