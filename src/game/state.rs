//! Hangman game state machine
//!
//! A game starts `InProgress` and moves to `Won` or `Lost` exactly once.
//! The guess history is append-only and frozen once the game is over.

use crate::config::game::Difficulty;
use crate::error::{HangmanError, Result};
use crate::game::word::TargetWord;
use crate::types::{GameId, GameStatus, GuessOutcome, GuessRecord, UserId};
use crate::utils::{current_timestamp, mask_word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single play-through of hangman
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    user_id: UserId,
    target_word: TargetWord,
    guessed_letters: BTreeSet<char>,
    wrong_guesses_allowed: u32,
    wrong_guesses_remaining: u32,
    guess_history: Vec<GuessRecord>,
    status: GameStatus,
    created_at: DateTime<Utc>,
}

impl Game {
    /// Create a new in-progress game
    pub fn new(
        id: GameId,
        user_id: UserId,
        target_word: TargetWord,
        difficulty: Difficulty,
    ) -> Result<Self> {
        difficulty.validate()?;
        let allowed = difficulty.wrong_guesses_allowed();

        Ok(Self {
            id,
            user_id,
            target_word,
            guessed_letters: BTreeSet::new(),
            wrong_guesses_allowed: allowed,
            wrong_guesses_remaining: allowed,
            guess_history: Vec::new(),
            status: GameStatus::InProgress,
            created_at: current_timestamp(),
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn wrong_guesses_allowed(&self) -> u32 {
        self.wrong_guesses_allowed
    }

    pub fn wrong_guesses_remaining(&self) -> u32 {
        self.wrong_guesses_remaining
    }

    /// Wrong guesses made so far
    pub fn wrong_guesses_made(&self) -> u32 {
        self.wrong_guesses_allowed - self.wrong_guesses_remaining
    }

    pub fn guess_history(&self) -> &[GuessRecord] {
        &self.guess_history
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn target_word_length(&self) -> usize {
        self.target_word.len()
    }

    /// The target word with unguessed letters masked
    pub fn word_progress(&self) -> String {
        mask_word(self.target_word.as_str(), &self.guessed_letters)
    }

    /// Apply an already-normalised letter guess.
    ///
    /// Fails without touching the game if it is over or the letter was
    /// guessed before; otherwise appends exactly one history record.
    pub fn apply_guess(&mut self, letter: char) -> Result<GuessRecord> {
        if self.is_over() {
            return Err(HangmanError::InvalidState {
                reason: format!("game {} is already over ({})", self.id, self.status),
            }
            .into());
        }

        if self.guessed_letters.contains(&letter) {
            return Err(HangmanError::InvalidGuess {
                reason: format!("letter '{}' has already been guessed", letter),
            }
            .into());
        }

        self.guessed_letters.insert(letter);

        let outcome = if self.target_word.contains(letter) {
            if self.target_word.is_revealed_by(&self.guessed_letters) {
                self.status = GameStatus::Won;
            }
            GuessOutcome::Correct
        } else {
            self.wrong_guesses_remaining -= 1;
            if self.wrong_guesses_remaining == 0 {
                self.status = GameStatus::Lost;
            }
            GuessOutcome::Wrong
        };

        let record = GuessRecord {
            letter,
            outcome,
            wrong_guesses_remaining: self.wrong_guesses_remaining,
        };
        self.guess_history.push(record.clone());

        Ok(record)
    }

    /// Outward representation of the game, hiding the word until it ends
    pub fn view(&self) -> GameView {
        GameView {
            game_id: self.id,
            user_id: self.user_id.clone(),
            target_word_length: self.target_word.len(),
            word_progress: self.word_progress(),
            wrong_guesses_allowed: self.wrong_guesses_allowed,
            wrong_guesses_remaining: self.wrong_guesses_remaining,
            status: self.status,
            game_over: self.is_over(),
            target_word: self
                .is_over()
                .then(|| self.target_word.as_str().to_string()),
        }
    }
}

/// Serializable snapshot of a game for callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: GameId,
    pub user_id: UserId,
    pub target_word_length: usize,
    pub word_progress: String,
    pub wrong_guesses_allowed: u32,
    pub wrong_guesses_remaining: u32,
    pub status: GameStatus,
    pub game_over: bool,
    pub target_word: Option<String>,
}
