//! Utility functions for the hangman service

use crate::error::{HangmanError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Character shown for letters that have not been guessed yet
pub const MASK_CHAR: char = '*';

/// Generate a new unique game ID
pub fn generate_game_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Get the current UTC date
pub fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Validate a raw guess and normalise it to a lowercase letter
pub fn normalize_guess(raw: &str) -> Result<char> {
    let mut chars = raw.trim().chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        (None, _) => {
            return Err(HangmanError::InvalidGuess {
                reason: "guess must not be empty".to_string(),
            }
            .into())
        }
        (Some(_), Some(_)) => {
            return Err(HangmanError::InvalidGuess {
                reason: "only single letters are allowed as guesses".to_string(),
            }
            .into())
        }
    };

    if !letter.is_ascii_alphabetic() {
        return Err(HangmanError::InvalidGuess {
            reason: format!("'{}' is not a letter of the alphabet", letter),
        }
        .into());
    }

    Ok(letter.to_ascii_lowercase())
}

/// Render a word with every letter not in `revealed` replaced by [`MASK_CHAR`]
pub fn mask_word(word: &str, revealed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| if revealed.contains(&c) { c } else { MASK_CHAR })
        .collect()
}
