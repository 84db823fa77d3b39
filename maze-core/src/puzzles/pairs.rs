//! Memory pairs puzzle.
//!
//! A shuffled deck of face-down cards holds exactly two of each symbol. The
//! player turns up two cards per move. A match is locked in after a short
//! pause, a mismatch is turned back down after a longer one, and no third
//! card can be turned while a pair is pending.

use super::Difficulty;
use crate::config::{MazeConfig, Timings};
use crate::schedule::{Clocked, Timeline};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Glyphs for card faces. A game with N pairs uses the first N.
pub const SYMBOLS: [&str; 12] = [
    "🍎", "🍌", "🍒", "🍓", "🍊", "🍋", "🍐", "🥝", "🥥", "🍇", "🍉", "🍍",
];

/// Cards are laid out four to a row at every difficulty.
pub const GRID_COLUMNS: usize = 4;

/// Stable identity of a card within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub usize);

/// Index into [`SYMBOLS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// The face glyph, or `None` for an index outside [`SYMBOLS`].
    pub fn glyph(&self) -> Option<&'static str> {
        SYMBOLS.get(usize::from(self.0)).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub face_up: bool,
    pub matched: bool,
}

/// Number of pairs in the deck.
pub fn pair_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 4,
        Difficulty::Medium => 6,
        Difficulty::Hard => 8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairTask {
    LockMatch(CardId, CardId),
    TurnBack(CardId, CardId),
}

#[derive(Debug)]
pub struct PairPuzzle {
    difficulty: Difficulty,
    timings: Timings,
    rng: StdRng,
    timeline: Timeline<PairTask>,
    cards: Vec<Card>,
    active: Vec<CardId>,
    moves: u32,
    matched_pairs: usize,
    started: bool,
    solved: bool,
}

impl PairPuzzle {
    /// Start a game with default settings and OS randomness.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, &MazeConfig::default())
    }

    pub fn with_config(difficulty: Difficulty, config: &MazeConfig) -> Self {
        let mut puzzle = Self {
            difficulty,
            timings: config.timings.clone(),
            rng: config.rng(),
            timeline: Timeline::new(),
            cards: Vec::new(),
            active: Vec::with_capacity(2),
            moves: 0,
            matched_pairs: 0,
            started: false,
            solved: false,
        };
        puzzle.deal();
        puzzle
    }

    /// Deal a freshly shuffled deck, cancelling any pending match or
    /// turn-back from the previous game.
    pub fn new_game(&mut self) {
        if self.solved {
            tracing::debug!("pairs puzzle already solved, ignoring new game");
            return;
        }
        self.deal();
    }

    fn deal(&mut self) {
        self.timeline.next_round();

        let pairs = pair_count(self.difficulty);
        let mut cards: Vec<Card> = (0..pairs)
            .flat_map(|i| {
                let symbol = Symbol(i as u8);
                [2 * i, 2 * i + 1].map(|id| Card {
                    id: CardId(id),
                    symbol,
                    face_up: false,
                    matched: false,
                })
            })
            .collect();
        cards.shuffle(&mut self.rng);

        self.cards = cards;
        self.active.clear();
        self.moves = 0;
        self.matched_pairs = 0;
        self.started = false;
        tracing::debug!(difficulty = %self.difficulty, pairs, "dealt memory cards");
    }

    /// Turn a card face-up.
    ///
    /// Ignored for unknown ids, cards already face-up or matched, while two
    /// cards are pending, and once the puzzle is solved.
    pub fn flip(&mut self, id: CardId) {
        if self.solved || self.active.len() >= 2 {
            return;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(card = id.0, "no such card");
            return;
        };
        if card.face_up || card.matched {
            return;
        }

        card.face_up = true;
        self.started = true;
        self.active.push(id);

        if let [first, second] = self.active[..] {
            self.moves += 1;
            if self.symbol_of(first) == self.symbol_of(second) {
                self.timeline
                    .schedule(self.timings.match_delay, PairTask::LockMatch(first, second));
            } else {
                self.timeline
                    .schedule(self.timings.mismatch_delay, PairTask::TurnBack(first, second));
            }
        }
    }

    fn symbol_of(&self, id: CardId) -> Option<Symbol> {
        self.card(id).map(|c| c.symbol)
    }

    fn apply(&mut self, task: PairTask) {
        match task {
            PairTask::LockMatch(a, b) => {
                for card in self.cards.iter_mut().filter(|c| c.id == a || c.id == b) {
                    card.matched = true;
                }
                self.active.clear();
                self.matched_pairs += 1;
                if self.matched_pairs == pair_count(self.difficulty) {
                    self.solved = true;
                    tracing::debug!(moves = self.moves, "memory pairs solved");
                }
            }
            PairTask::TurnBack(a, b) => {
                for card in self.cards.iter_mut().filter(|c| c.id == a || c.id == b) {
                    card.face_up = false;
                }
                self.active.clear();
            }
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cards in table order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards turned up and awaiting resolution, in the order flipped.
    pub fn active_flips(&self) -> &[CardId] {
        &self.active
    }

    /// Completed moves (pairs turned up).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        pair_count(self.difficulty)
    }

    /// Whether any card has been turned this game.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Whether a match or turn-back is still pending.
    pub fn is_resolving(&self) -> bool {
        !self.timeline.is_idle()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

impl Clocked for PairPuzzle {
    fn advance(&mut self, dt: Duration) {
        let horizon = self.timeline.horizon(dt);
        while let Some(task) = self.timeline.pop_due(horizon) {
            self.apply(task);
        }
        self.timeline.settle(horizon);
    }
}
