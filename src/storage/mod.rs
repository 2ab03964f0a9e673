//! Persistence interface for users, games and scores
//!
//! This module defines the storage boundary of the service together with an
//! in-memory implementation.

pub mod memory;

pub use memory::InMemoryGameStore;

use crate::error::Result;
use crate::game::Game;
use crate::types::{GameId, Score, User};

/// Trait for game storage operations
#[cfg_attr(test, mockall::automock)]
pub trait GameStore: Send + Sync {
    /// Store a new user; fails if the name is taken
    fn insert_user(&self, user: User) -> Result<()>;

    /// Get a user by name
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Get all users, ordered by name
    fn list_users(&self) -> Result<Vec<User>>;

    /// Get the number of users
    fn user_count(&self) -> Result<usize>;

    /// Store a newly created game
    fn insert_game(&self, game: Game) -> Result<()>;

    /// Update an in-progress game; completed games go through
    /// [`GameStore::commit_completion`]
    fn save_game(&self, game: Game) -> Result<()>;

    /// Get a game by id
    fn get_game(&self, game_id: &GameId) -> Result<Option<Game>>;

    /// Remove a game, returning whether it existed
    fn delete_game(&self, game_id: &GameId) -> Result<bool>;

    /// Get a user's games, oldest first, optionally only those in progress
    fn list_user_games(&self, user_id: &str, active_only: bool) -> Result<Vec<Game>>;

    /// Get every in-progress game
    fn list_active_games(&self) -> Result<Vec<Game>>;

    /// Get all scores in completion order
    fn list_scores(&self) -> Result<Vec<Score>>;

    /// Get a user's scores in completion order
    fn list_user_scores(&self, user_id: &str) -> Result<Vec<Score>>;

    /// Get the score of a completed game
    fn get_score(&self, game_id: &GameId) -> Result<Option<Score>>;

    /// Atomically store a completed game, its score and the updated user.
    ///
    /// Returns `false` and stores nothing if a score for the game already
    /// exists. Fails if `user` is not the stored user with exactly this
    /// game's result applied.
    fn commit_completion(&self, game: Game, score: Score, user: User) -> Result<bool>;
}
