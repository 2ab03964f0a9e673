//! Game rules configuration

use crate::error::HangmanError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound on the wrong-guess allowance; also the best possible score
pub const MAX_WRONG_GUESSES: u32 = 10;

/// Default minimum length of a target word
pub const DEFAULT_MIN_TARGET_WORD_LENGTH: usize = 8;

/// Difficulty level chosen when a game is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom(u32),
}

impl Difficulty {
    /// Number of wrong guesses a game of this difficulty permits
    pub fn wrong_guesses_allowed(&self) -> u32 {
        match self {
            Difficulty::Easy => MAX_WRONG_GUESSES,
            Difficulty::Medium => 7,
            Difficulty::Hard => 5,
            Difficulty::Custom(n) => *n,
        }
    }

    /// Check that the allowance lies in `1..=MAX_WRONG_GUESSES`
    pub fn validate(&self) -> crate::error::Result<()> {
        let allowed = self.wrong_guesses_allowed();
        if allowed == 0 || allowed > MAX_WRONG_GUESSES {
            return Err(HangmanError::InvalidDifficulty {
                reason: format!(
                    "wrong guess allowance must be between 1 and {}, got {}",
                    MAX_WRONG_GUESSES, allowed
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Custom(n) => write!(f, "custom({})", n),
        }
    }
}

impl FromStr for Difficulty {
    type Err = HangmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => other
                .parse::<u32>()
                .map(Difficulty::Custom)
                .map_err(|_| HangmanError::ConfigurationError {
                    message: format!("Unknown difficulty: {}", s),
                }),
        }
    }
}

/// Rules applied when creating and scoring games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub default_difficulty: Difficulty,
    pub min_target_word_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            min_target_word_length: DEFAULT_MIN_TARGET_WORD_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_allowances() {
        assert_eq!(Difficulty::Easy.wrong_guesses_allowed(), 10);
        assert_eq!(Difficulty::Medium.wrong_guesses_allowed(), 7);
        assert_eq!(Difficulty::Hard.wrong_guesses_allowed(), 5);
        assert_eq!(Difficulty::Custom(3).wrong_guesses_allowed(), 3);
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_validation() {
        assert!(Difficulty::Custom(1).validate().is_ok());
        assert!(Difficulty::Custom(10).validate().is_ok());
        assert!(Difficulty::Custom(0).validate().is_err());
        assert!(Difficulty::Custom(11).validate().is_err());
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("4".parse::<Difficulty>().unwrap(), Difficulty::Custom(4));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
