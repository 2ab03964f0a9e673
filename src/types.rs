//! Common types used throughout the hangman service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for users (the user name)
pub type UserId = String;

/// Unique identifier for games
pub type GameId = Uuid;

/// Lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Whether the game has reached a terminal state
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Whether a guessed letter occurs in the target word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    Wrong,
}

/// One entry of a game's guess history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub letter: char,
    pub outcome: GuessOutcome,
    /// Wrong guesses left after this guess was applied
    pub wrong_guesses_remaining: u32,
}

impl GuessRecord {
    pub fn is_correct(&self) -> bool {
        self.outcome == GuessOutcome::Correct
    }
}

/// Immutable result of a completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub game_id: GameId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub won: bool,
    /// Wrong guesses made during the game
    pub wrong_guesses: u32,
    /// Remaining allowance on a win, 0 on a loss
    pub final_score: u32,
}

/// User profile with cumulative game counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: UserId,
    pub email: Option<String>,
    pub wins: u64,
    pub games_played: u64,
    pub total_score: u64,
    /// Games whose results have already been applied to the counters
    #[serde(default)]
    pub recorded_games: HashSet<GameId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with zeroed counters
    pub fn new(name: impl Into<UserId>, email: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
            wins: 0,
            games_played: 0,
            total_score: 0,
            recorded_games: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the result of the given game has been applied
    pub fn has_recorded(&self, game_id: &GameId) -> bool {
        self.recorded_games.contains(game_id)
    }

    pub fn losses(&self) -> u64 {
        self.games_played - self.wins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_zero_counters() {
        let user = User::new("alice", Some("alice@example.com".to_string()));
        assert_eq!(user.name, "alice");
        assert_eq!(user.wins, 0);
        assert_eq!(user.games_played, 0);
        assert_eq!(user.total_score, 0);
        assert_eq!(user.losses(), 0);
        assert!(user.recorded_games.is_empty());
    }

    #[test]
    fn test_game_status_terminal_states() {
        assert!(!GameStatus::InProgress.is_over());
        assert!(GameStatus::Won.is_over());
        assert!(GameStatus::Lost.is_over());
        assert_eq!(GameStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_guess_record_serializes_as_structured_entry() {
        let record = GuessRecord {
            letter: 'e',
            outcome: GuessOutcome::Wrong,
            wrong_guesses_remaining: 9,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["letter"], "e");
        assert_eq!(json["outcome"], "wrong");
        assert_eq!(json["wrong_guesses_remaining"], 9);
    }
}
