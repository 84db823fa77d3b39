//! The four mood paths a player can choose.
//!
//! A mood decides which puzzles appear on the path (see [`crate::selector`])
//! and carries the text shown when the path starts and ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown mood tag.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown mood: {0}")]
pub struct UnknownMood(pub String);

/// A thematic path through the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Excited,
    Anxious,
}

impl Mood {
    pub fn all() -> [Mood; 4] {
        [Mood::Happy, Mood::Calm, Mood::Excited, Mood::Anxious]
    }

    /// Lowercase tag used in journey events and routes ("happy").
    pub fn tag(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Excited => "excited",
            Mood::Anxious => "anxious",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Excited => "Excited",
            Mood::Anxious => "Anxious",
        }
    }

    /// Heading for the path, e.g. "Calm Path".
    pub fn path_title(&self) -> String {
        format!("{} Path", self.name())
    }

    /// Introduction shown before the first puzzle.
    pub fn start_description(&self) -> &'static str {
        match self {
            Mood::Happy => "You've chosen the path of joy! Solve colorful puzzles that celebrate creativity and positivity.",
            Mood::Calm => "Welcome to the tranquil path. These puzzles will help you find your center through mindful challenges.",
            Mood::Excited => "Energy flows through this path! Get ready for fast-paced puzzles that will keep your adrenaline pumping.",
            Mood::Anxious => "This grounding path offers puzzles designed to help you focus and find clarity through the fog.",
        }
    }

    /// Reflection shown on the journey summary.
    pub fn journey_description(&self) -> &'static str {
        match self {
            Mood::Happy => "Your journey through the happy path reveals your joyful spirit and creative energy. You approached challenges with optimism and found delight in the colorful puzzles.",
            Mood::Calm => "Your tranquil journey shows your mindful approach to challenges. You navigated the puzzles with patience and thoughtfulness, finding harmony in each step.",
            Mood::Excited => "Your energetic path demonstrates your enthusiasm and quick thinking. You tackled each puzzle with vigor and embraced the fast-paced challenges.",
            Mood::Anxious => "Your grounding journey reveals your ability to find focus amidst uncertainty. You approached each puzzle methodically, finding clarity through concentration.",
        }
    }

    /// Problem-solving style attributed to the player on the summary.
    pub fn problem_solving_style(&self) -> &'static str {
        match self {
            Mood::Happy => "creative and optimistic",
            Mood::Calm => "methodical and patient",
            Mood::Excited => "energetic and spontaneous",
            Mood::Anxious => "focused and analytical",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "calm" => Ok(Mood::Calm),
            "excited" => Ok(Mood::Excited),
            "anxious" => Ok(Mood::Anxious),
            _ => Err(UnknownMood(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_tag() {
        for mood in Mood::all() {
            assert_eq!(mood.tag().parse::<Mood>(), Ok(mood));
        }
        assert_eq!(" Calm ".parse::<Mood>(), Ok(Mood::Calm));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "grumpy".parse::<Mood>(),
            Err(UnknownMood("grumpy".to_string()))
        );
    }

    #[test]
    fn test_display_uses_lowercase_tag() {
        assert_eq!(Mood::Excited.to_string(), "excited");
        assert_eq!(Mood::Excited.path_title(), "Excited Path");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Mood::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
        let mood: Mood = serde_json::from_str("\"happy\"").unwrap();
        assert_eq!(mood, Mood::Happy);
    }
}
