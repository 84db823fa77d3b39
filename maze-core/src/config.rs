//! Configuration for puzzle timing and randomness.

use crate::puzzles::Difficulty;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Shortest stopwatch tick the engines will schedule.
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// Delays and windows used by the puzzle engines.
///
/// The defaults are the values the game ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct Timings {
    /// Pause before a matching pair is marked matched.
    pub match_delay: Duration,

    /// Pause before a mismatched pair flips back face-down.
    pub mismatch_delay: Duration,

    /// How long the target pattern is shown again after a wrong check.
    pub review_window: Duration,

    /// Stopwatch resolution for the timing puzzle.
    pub tick: Duration,

    /// Initial reveal of the target pattern, per difficulty.
    pub reveal: [Duration; 3],
}

impl Timings {
    /// The stopwatch tick, never shorter than [`MIN_TICK`].
    pub fn tick_interval(&self) -> Duration {
        self.tick.max(MIN_TICK)
    }

    /// How long a fresh pattern is shown before input unlocks.
    pub fn reveal_duration(&self, difficulty: Difficulty) -> Duration {
        match difficulty {
            Difficulty::Easy => self.reveal[0],
            Difficulty::Medium => self.reveal[1],
            Difficulty::Hard => self.reveal[2],
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            match_delay: Duration::from_millis(500),
            mismatch_delay: Duration::from_millis(1000),
            review_window: Duration::from_millis(1500),
            tick: Duration::from_millis(100),
            reveal: [
                Duration::from_millis(3000),
                Duration::from_millis(2500),
                Duration::from_millis(2000),
            ],
        }
    }
}

/// Configuration shared by every puzzle in a play-through.
#[derive(Debug, Clone, Default)]
pub struct MazeConfig {
    /// Seed for reproducible puzzles. `None` draws from the OS.
    pub seed: Option<u64>,

    /// Engine delays.
    pub timings: Timings,
}

impl MazeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every puzzle built from this config reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the engine delays.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// A config for an independent random stream (one per puzzle slot).
    ///
    /// Unseeded configs stay unseeded.
    pub fn derive(&self, stream: u64) -> Self {
        Self {
            seed: self
                .seed
                .map(|seed| seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
            timings: self.timings.clone(),
        }
    }

    /// Build the random number generator for one engine.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.match_delay, Duration::from_millis(500));
        assert_eq!(timings.mismatch_delay, Duration::from_secs(1));
        assert_eq!(timings.review_window, Duration::from_millis(1500));
        assert_eq!(timings.tick, Duration::from_millis(100));
        assert_eq!(timings.reveal_duration(Difficulty::Easy), Duration::from_secs(3));
        assert_eq!(timings.reveal_duration(Difficulty::Medium), Duration::from_millis(2500));
        assert_eq!(timings.reveal_duration(Difficulty::Hard), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let timings = Timings {
            tick: Duration::ZERO,
            ..Timings::default()
        };
        assert_eq!(timings.tick_interval(), MIN_TICK);
        assert_eq!(Timings::default().tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = MazeConfig::new().with_seed(7);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derived_streams_differ() {
        let config = MazeConfig::new().with_seed(7);
        assert_ne!(config.derive(1).seed, config.derive(2).seed);
        assert_eq!(config.derive(1).seed, config.derive(1).seed);
        assert_eq!(MazeConfig::new().derive(3).seed, None);
    }

    #[test]
    fn test_builder() {
        let timings = Timings {
            tick: Duration::from_millis(50),
            ..Timings::default()
        };
        let config = MazeConfig::new().with_seed(1).with_timings(timings);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.timings.tick, Duration::from_millis(50));
    }
}
