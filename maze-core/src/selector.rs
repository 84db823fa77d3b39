//! Which puzzle each mood path runs in each slot.
//!
//! The whole mood × slot relationship lives in [`PATH_TABLE`] so it can be
//! read and audited as data. Difficulty rises Easy → Medium → Hard along every
//! path, and no path repeats an engine in consecutive slots.

use crate::mood::Mood;
use crate::puzzles::Difficulty::{self, Easy, Hard, Medium};
use crate::puzzles::PuzzleKind::{self, Pairs, Pattern, Sequence, Timing};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Puzzles per mood path.
pub const TOTAL_SLOTS: u8 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Puzzle slot {0} is out of range (expected 1..=3)")]
pub struct InvalidSlot(pub u8);

/// A 1-indexed puzzle position along a path. Always within `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub const FIRST: Slot = Slot(1);
    pub const LAST: Slot = Slot(TOTAL_SLOTS);

    pub fn new(n: u8) -> Result<Self, InvalidSlot> {
        if (1..=TOTAL_SLOTS).contains(&n) {
            Ok(Slot(n))
        } else {
            Err(InvalidSlot(n))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// The following slot, or `None` after the last one.
    pub fn next(&self) -> Option<Slot> {
        Slot::new(self.0 + 1).ok()
    }

    pub fn is_last(&self) -> bool {
        *self == Slot::LAST
    }

    pub fn all() -> [Slot; TOTAL_SLOTS as usize] {
        [Slot(1), Slot(2), Slot(3)]
    }

    fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Slot {
    type Error = InvalidSlot;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Slot::new(n)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The engine and difficulty for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleSpec {
    pub kind: PuzzleKind,
    pub difficulty: Difficulty,
}

const fn spec(kind: PuzzleKind, difficulty: Difficulty) -> PuzzleSpec {
    PuzzleSpec { kind, difficulty }
}

/// Rows follow [`Mood::all`]; columns are slots 1..=3.
pub const PATH_TABLE: [[PuzzleSpec; TOTAL_SLOTS as usize]; 4] = [
    // Happy
    [spec(Sequence, Easy), spec(Pairs, Medium), spec(Pattern, Hard)],
    // Calm
    [spec(Pattern, Easy), spec(Sequence, Medium), spec(Pairs, Hard)],
    // Excited
    [spec(Timing, Easy), spec(Pattern, Medium), spec(Sequence, Hard)],
    // Anxious
    [spec(Pairs, Easy), spec(Timing, Medium), spec(Pattern, Hard)],
];

fn row(mood: Mood) -> usize {
    match mood {
        Mood::Happy => 0,
        Mood::Calm => 1,
        Mood::Excited => 2,
        Mood::Anxious => 3,
    }
}

/// The puzzle a mood path runs in a slot.
pub fn select(mood: Mood, slot: Slot) -> PuzzleSpec {
    PATH_TABLE[row(mood)][slot.index()]
}

/// Every puzzle on a mood path, in order.
pub fn path(mood: Mood) -> [PuzzleSpec; TOTAL_SLOTS as usize] {
    PATH_TABLE[row(mood)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert_eq!(Slot::new(0), Err(InvalidSlot(0)));
        assert_eq!(Slot::new(4), Err(InvalidSlot(4)));
        assert_eq!(Slot::new(1).unwrap(), Slot::FIRST);
        assert_eq!(Slot::new(3).unwrap(), Slot::LAST);
    }

    #[test]
    fn test_slot_next() {
        assert_eq!(Slot::FIRST.next().map(|s| s.get()), Some(2));
        assert_eq!(Slot::LAST.next(), None);
        assert!(Slot::LAST.is_last());
        assert!(!Slot::FIRST.is_last());
    }

    #[test]
    fn test_difficulty_strictly_increases() {
        for mood in Mood::all() {
            let specs = path(mood);
            for pair in specs.windows(2) {
                assert!(pair[0].difficulty < pair[1].difficulty, "{mood}");
            }
            assert_eq!(specs[0].difficulty, Difficulty::Easy);
            assert_eq!(specs[2].difficulty, Difficulty::Hard);
        }
    }

    #[test]
    fn test_no_consecutive_repeat() {
        for mood in Mood::all() {
            for pair in path(mood).windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind, "{mood}");
            }
        }
    }

    #[test]
    fn test_moods_have_distinct_orderings() {
        let orderings: Vec<_> = Mood::all()
            .iter()
            .map(|&m| path(m).map(|s| s.kind))
            .collect();
        for (i, a) in orderings.iter().enumerate() {
            for b in &orderings[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_select_matches_table() {
        assert_eq!(
            select(Mood::Happy, Slot::FIRST),
            PuzzleSpec {
                kind: PuzzleKind::Sequence,
                difficulty: Difficulty::Easy
            }
        );
        assert_eq!(select(Mood::Anxious, Slot::new(2).unwrap()).kind, PuzzleKind::Timing);
        assert_eq!(select(Mood::Excited, Slot::LAST).kind, PuzzleKind::Sequence);
    }

    #[test]
    fn test_slot_serde_rejects_out_of_range() {
        let slot: Slot = serde_json::from_str("2").unwrap();
        assert_eq!(slot.get(), 2);
        assert!(serde_json::from_str::<Slot>("7").is_err());
    }
}
