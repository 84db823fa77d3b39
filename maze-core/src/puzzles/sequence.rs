//! Color sequence puzzle.
//!
//! The player is shown a target order of colors and must pick the palette
//! colors in exactly that order. The check is positional: the right colors in
//! the wrong order do not count.

use super::Difficulty;
use crate::config::MazeConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed universe of nine colors a palette is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    LightPink,
}

impl Color {
    pub fn all() -> [Color; 9] {
        [
            Color::Red,
            Color::Orange,
            Color::Yellow,
            Color::Green,
            Color::Cyan,
            Color::Blue,
            Color::Purple,
            Color::Pink,
            Color::LightPink,
        ]
    }

    /// CSS hex value.
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#EF4444",
            Color::Orange => "#F97316",
            Color::Yellow => "#FACC15",
            Color::Green => "#4ADE80",
            Color::Cyan => "#22D3EE",
            Color::Blue => "#60A5FA",
            Color::Purple => "#8B5CF6",
            Color::Pink => "#EC4899",
            Color::LightPink => "#F472B6",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::LightPink => "light pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Verdict once the selection is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceFeedback {
    Correct,
    Incorrect,
}

/// Number of colors in the palette and the target.
pub fn palette_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 4,
        Difficulty::Medium => 6,
        Difficulty::Hard => 9,
    }
}

#[derive(Debug)]
pub struct SequencePuzzle {
    difficulty: Difficulty,
    rng: StdRng,
    palette: Vec<Color>,
    target: Vec<Color>,
    selection: Vec<Color>,
    feedback: Option<SequenceFeedback>,
    solved: bool,
}

impl SequencePuzzle {
    /// Start a puzzle with default settings and OS randomness.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, &MazeConfig::default())
    }

    pub fn with_config(difficulty: Difficulty, config: &MazeConfig) -> Self {
        let mut puzzle = Self {
            difficulty,
            rng: config.rng(),
            palette: Vec::new(),
            target: Vec::new(),
            selection: Vec::new(),
            feedback: None,
            solved: false,
        };
        puzzle.generate();
        puzzle
    }

    /// Draw a fresh palette and target order and clear the selection.
    pub fn new_round(&mut self) {
        if self.solved {
            tracing::debug!("sequence puzzle already solved, ignoring new round");
            return;
        }
        self.generate();
    }

    fn generate(&mut self) {
        let k = palette_size(self.difficulty);
        self.palette = Color::all()
            .choose_multiple(&mut self.rng, k)
            .copied()
            .collect();
        self.target = self.palette.clone();
        self.target.shuffle(&mut self.rng);
        self.selection.clear();
        self.feedback = None;
        tracing::debug!(difficulty = %self.difficulty, k, "new color sequence");
    }

    /// Append a color to the selection.
    ///
    /// Ignored when the selection is already full, when the color is not in
    /// the palette, or when the puzzle is solved. Filling the last position
    /// checks the selection against the target.
    pub fn select(&mut self, color: Color) {
        if self.solved || self.selection.len() >= self.target.len() {
            return;
        }
        if !self.palette.contains(&color) {
            tracing::debug!(%color, "color not in palette");
            return;
        }
        self.selection.push(color);

        if self.selection.len() == self.target.len() {
            if self.selection == self.target {
                self.feedback = Some(SequenceFeedback::Correct);
                self.solved = true;
                tracing::debug!("color sequence solved");
            } else {
                self.feedback = Some(SequenceFeedback::Incorrect);
            }
        }
    }

    /// Clear the selection, keeping the palette and target.
    pub fn reset_selection(&mut self) {
        if self.solved {
            return;
        }
        self.selection.clear();
        self.feedback = None;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn target(&self) -> &[Color] {
        &self.target
    }

    pub fn selection(&self) -> &[Color] {
        &self.selection
    }

    /// `Some` once every position has been filled.
    pub fn feedback(&self) -> Option<SequenceFeedback> {
        self.feedback
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn puzzle(difficulty: Difficulty) -> SequencePuzzle {
        SequencePuzzle::with_config(difficulty, &MazeConfig::new().with_seed(11))
    }

    #[test]
    fn test_palette_is_distinct_and_target_is_permutation() {
        for difficulty in Difficulty::all() {
            let p = puzzle(difficulty);
            let k = palette_size(difficulty);
            assert_eq!(p.palette().len(), k);
            assert_eq!(p.target().len(), k);

            let palette: HashSet<_> = p.palette().iter().collect();
            let target: HashSet<_> = p.target().iter().collect();
            assert_eq!(palette.len(), k);
            assert_eq!(palette, target);
        }
    }

    #[test]
    fn test_matching_selection_solves() {
        for difficulty in Difficulty::all() {
            let mut p = puzzle(difficulty);
            for color in p.target().to_vec() {
                p.select(color);
            }
            assert!(p.is_solved());
            assert_eq!(p.feedback(), Some(SequenceFeedback::Correct));
        }
    }

    #[test]
    fn test_same_colors_wrong_order_fails() {
        let mut p = puzzle(Difficulty::Medium);
        let mut wrong = p.target().to_vec();
        wrong.rotate_left(1);

        for color in wrong {
            p.select(color);
        }
        assert!(!p.is_solved());
        assert_eq!(p.feedback(), Some(SequenceFeedback::Incorrect));
    }

    #[test]
    fn test_select_ignored_when_full() {
        let mut p = puzzle(Difficulty::Easy);
        let first = p.palette()[0];
        for _ in 0..4 {
            p.select(first);
        }
        assert_eq!(p.selection().len(), 4);

        p.select(first);
        assert_eq!(p.selection().len(), 4);
    }

    #[test]
    fn test_color_outside_palette_ignored() {
        let mut p = puzzle(Difficulty::Easy);
        let outside = Color::all()
            .into_iter()
            .find(|c| !p.palette().contains(c))
            .expect("easy palette leaves colors unused");

        p.select(outside);
        assert!(p.selection().is_empty());
    }

    #[test]
    fn test_reset_selection_keeps_target() {
        let mut p = puzzle(Difficulty::Easy);
        let target = p.target().to_vec();
        p.select(p.palette()[0]);
        p.select(p.palette()[1]);

        p.reset_selection();
        assert!(p.selection().is_empty());
        assert_eq!(p.target(), target.as_slice());

        for color in target {
            p.select(color);
        }
        assert!(p.is_solved());
    }

    #[test]
    fn test_new_round_clears_selection() {
        let mut p = puzzle(Difficulty::Hard);
        p.select(p.palette()[0]);
        p.new_round();
        assert!(p.selection().is_empty());
        assert_eq!(p.feedback(), None);
        assert_eq!(p.palette().len(), 9);
    }

    #[test]
    fn test_solved_is_monotonic() {
        let mut p = puzzle(Difficulty::Easy);
        for color in p.target().to_vec() {
            p.select(color);
        }
        p.reset_selection();
        p.new_round();
        assert!(p.is_solved());
        assert_eq!(p.selection().len(), 4);
    }
}
