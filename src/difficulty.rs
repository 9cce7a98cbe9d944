use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Difficulty tag selected from the CLI or the in-game hotkeys.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Immutable tuning values for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Tick interval at the start of a session, in milliseconds.
    pub initial_speed_ms: u64,
    /// Milliseconds removed from the tick interval per primary food.
    pub speed_decrement_ms: u64,
    /// Probability of a bonus food appearing after a primary food is eaten.
    pub bonus_chance: f64,
    pub bonus_points: u32,
    pub bonus_duration: Duration,
}

const EASY: DifficultyProfile = DifficultyProfile {
    initial_speed_ms: 120,
    speed_decrement_ms: 1,
    bonus_chance: 0.005,
    bonus_points: 20,
    bonus_duration: Duration::from_millis(10_000),
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    initial_speed_ms: 100,
    speed_decrement_ms: 2,
    bonus_chance: 0.01,
    bonus_points: 30,
    bonus_duration: Duration::from_millis(7_000),
};

const HARD: DifficultyProfile = DifficultyProfile {
    initial_speed_ms: 80,
    speed_decrement_ms: 3,
    bonus_chance: 0.02,
    bonus_points: 50,
    bonus_duration: Duration::from_millis(5_000),
};

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the static profile for this difficulty.
    #[must_use]
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(tag.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(tag.to_owned()))
    }
}
