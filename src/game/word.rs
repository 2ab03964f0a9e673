//! Target word validation

use crate::error::{HangmanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A validated, lowercase target word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetWord(String);

impl TargetWord {
    /// Validate a raw word: a single run of ASCII letters of at least `min_length`
    pub fn parse(word: &str, min_length: usize) -> Result<Self> {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HangmanError::InvalidTargetWord {
                reason: "target word must be a single word without numbers or special characters"
                    .to_string(),
            }
            .into());
        }

        if word.len() < min_length {
            return Err(HangmanError::InvalidTargetWord {
                reason: format!(
                    "target word must be at least {} characters long",
                    min_length
                ),
            }
            .into());
        }

        Ok(Self(word.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    /// Whether every letter of the word is in `guessed`
    pub fn is_revealed_by(&self, guessed: &BTreeSet<char>) -> bool {
        self.0.chars().all(|c| guessed.contains(&c))
    }
}

impl std::fmt::Display for TargetWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let word = TargetWord::parse("Elephant", 8).unwrap();
        assert_eq!(word.as_str(), "elephant");
        assert_eq!(word.len(), 8);
    }

    #[test]
    fn test_parse_rejects_invalid_words() {
        for raw in [
            "",
            "two words",
            "abc123xyz",
            "hyphen-ated",
            "short",
            "  elephant  ",
            "elephant\n",
        ] {
            let err = TargetWord::parse(raw, 8).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<HangmanError>(),
                    Some(HangmanError::InvalidTargetWord { .. })
                ),
                "expected InvalidTargetWord for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_is_revealed_by() {
        let word = TargetWord::parse("banana", 3).unwrap();
        let partial: BTreeSet<char> = ['b', 'a'].into_iter().collect();
        let full: BTreeSet<char> = ['b', 'a', 'n', 'z'].into_iter().collect();
        assert!(!word.is_revealed_by(&partial));
        assert!(word.is_revealed_by(&full));
    }
}
