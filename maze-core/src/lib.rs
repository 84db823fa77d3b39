//! Mood Maze puzzle engine and journey state.
//!
//! This crate provides:
//! - Four self-contained puzzle engines (color sequence, memory pairs,
//!   pattern recall, perfect timing) driven by a virtual clock
//! - A fixed mood × slot table choosing which engine runs where
//! - The session store and the journey runner that writes it
//! - A tokio clock driver for hosts that want real time
//!
//! # Quick Start
//!
//! ```ignore
//! use maze_core::{JourneyRunner, MazeConfig, MazeSession, Mood, Clocked};
//! use std::time::Duration;
//!
//! let mut session = MazeSession::new();
//! let mut runner = JourneyRunner::begin(&mut session, "happy".parse()?, MazeConfig::new());
//!
//! if let Some(sequence) = runner.puzzle_mut().and_then(|p| p.as_sequence_mut()) {
//!     let first = sequence.palette()[0];
//!     sequence.select(first);
//! }
//! runner.advance(Duration::from_millis(100));
//! runner.sync(&mut session);
//! ```

pub mod config;
pub mod driver;
pub mod journey;
pub mod mood;
pub mod puzzles;
pub mod schedule;
pub mod selector;
pub mod session;
pub mod testing;

// Primary public API
pub use config::{MazeConfig, Timings};
pub use driver::{spawn_clock, ClockHandle};
pub use journey::{JourneyError, JourneyRunner, JourneySummary, Step};
pub use mood::{Mood, UnknownMood};
pub use puzzles::{Difficulty, Puzzle, PuzzleKind};
pub use schedule::{Clocked, Timeline};
pub use selector::{select, InvalidSlot, PuzzleSpec, Slot, TOTAL_SLOTS};
pub use session::{MazeSession, SessionSnapshot};
pub use testing::JourneyHarness;
