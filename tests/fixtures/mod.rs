//! Test fixtures and store wrappers for integration testing

#![allow(dead_code)]

use hangman_ledger::config::Difficulty;
use hangman_ledger::error::Result;
use hangman_ledger::game::Game;
use hangman_ledger::metrics::MetricsCollector;
use hangman_ledger::scoring::ScoreCalculator;
use hangman_ledger::service::{HangmanService, MoveResult};
use hangman_ledger::storage::{GameStore, InMemoryGameStore};
use hangman_ledger::types::{GameId, Score, User};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Game store that counts completion commits on top of the in-memory store
#[derive(Default)]
pub struct RecordingGameStore {
    inner: InMemoryGameStore,
    commits_attempted: AtomicUsize,
    commits_applied: AtomicUsize,
}

impl RecordingGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commit_completion calls
    pub fn commits_attempted(&self) -> usize {
        self.commits_attempted.load(Ordering::SeqCst)
    }

    /// Number of commit_completion calls that stored a result
    pub fn commits_applied(&self) -> usize {
        self.commits_applied.load(Ordering::SeqCst)
    }
}

impl GameStore for RecordingGameStore {
    fn insert_user(&self, user: User) -> Result<()> {
        self.inner.insert_user(user)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.inner.get_user(user_id)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.inner.list_users()
    }

    fn user_count(&self) -> Result<usize> {
        self.inner.user_count()
    }

    fn insert_game(&self, game: Game) -> Result<()> {
        self.inner.insert_game(game)
    }

    fn save_game(&self, game: Game) -> Result<()> {
        self.inner.save_game(game)
    }

    fn get_game(&self, game_id: &GameId) -> Result<Option<Game>> {
        self.inner.get_game(game_id)
    }

    fn delete_game(&self, game_id: &GameId) -> Result<bool> {
        self.inner.delete_game(game_id)
    }

    fn list_user_games(&self, user_id: &str, active_only: bool) -> Result<Vec<Game>> {
        self.inner.list_user_games(user_id, active_only)
    }

    fn list_active_games(&self) -> Result<Vec<Game>> {
        self.inner.list_active_games()
    }

    fn list_scores(&self) -> Result<Vec<Score>> {
        self.inner.list_scores()
    }

    fn list_user_scores(&self, user_id: &str) -> Result<Vec<Score>> {
        self.inner.list_user_scores(user_id)
    }

    fn get_score(&self, game_id: &GameId) -> Result<Option<Score>> {
        self.inner.get_score(game_id)
    }

    fn commit_completion(&self, game: Game, score: Score, user: User) -> Result<bool> {
        self.commits_attempted.fetch_add(1, Ordering::SeqCst);
        let applied = self.inner.commit_completion(game, score, user)?;
        if applied {
            self.commits_applied.fetch_add(1, Ordering::SeqCst);
        }
        Ok(applied)
    }
}

/// Build a service over a recording store with the default rules
pub fn create_test_service() -> (Arc<HangmanService>, Arc<RecordingGameStore>) {
    let store = Arc::new(RecordingGameStore::new());
    let service = Arc::new(HangmanService::new(
        store.clone(),
        ScoreCalculator::default(),
        Arc::new(MetricsCollector::new().expect("Failed to create metrics collector")),
        10,
    ));
    (service, store)
}

/// Guess each letter in turn, returning every move result
pub fn play_letters(service: &HangmanService, game_id: &GameId, letters: &str) -> Vec<MoveResult> {
    letters
        .chars()
        .map(|letter| {
            service
                .make_move(game_id, &letter.to_string())
                .unwrap_or_else(|e| panic!("guess '{}' failed: {}", letter, e))
        })
        .collect()
}

/// Create the user if needed, start a game and play it
pub fn play_game(
    service: &HangmanService,
    user: &str,
    word: &str,
    letters: &str,
    difficulty: Option<Difficulty>,
) -> (GameId, Vec<MoveResult>) {
    if service.get_user(user).is_err() {
        service.create_user(user, None).expect("Failed to create user");
    }
    let game = service
        .new_game(user, word, difficulty)
        .expect("Failed to create game");
    let moves = play_letters(service, &game.game_id, letters);
    (game.game_id, moves)
}

/// Letters that never appear in "elephant", ten of them
pub const ELEPHANT_MISSES: &str = "bcdfgijkmo";
