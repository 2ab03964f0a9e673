//! Game operations of the hangman service
//!
//! [`HangmanService`] ties the score calculator to a [`GameStore`]. Moves,
//! completions and cancellations are serialized per user so concurrent
//! requests for the same user never lose guesses or counter updates.

use crate::config::game::Difficulty;
use crate::error::{as_hangman_error, HangmanError, Result};
use crate::game::GameView;
use crate::metrics::MetricsCollector;
use crate::scoring::{self, RankingEntry, ScoreCalculator};
use crate::storage::GameStore;
use crate::types::{GameId, GameStatus, GuessOutcome, GuessRecord, Score, User, UserId};
use crate::utils::generate_game_id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::{debug, info, warn};

/// Result of a single move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResult {
    pub game: GameView,
    pub guess: GuessRecord,
    pub message: String,
    /// Present when the move ended the game
    pub score: Option<Score>,
}

/// Aggregate counts reported by health checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub users: usize,
    pub active_games: usize,
    pub completed_games: usize,
    pub average_wrong_guesses_remaining: Option<f64>,
}

/// Hangman game operations over a game store
pub struct HangmanService {
    store: Arc<dyn GameStore>,
    calculator: ScoreCalculator,
    metrics: Arc<MetricsCollector>,
    high_scores_limit: usize,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
    average_cache: RwLock<Option<f64>>,
}

impl HangmanService {
    pub fn new(
        store: Arc<dyn GameStore>,
        calculator: ScoreCalculator,
        metrics: Arc<MetricsCollector>,
        high_scores_limit: usize,
    ) -> Self {
        Self {
            store,
            calculator,
            metrics,
            high_scores_limit,
            user_locks: Mutex::new(HashMap::new()),
            average_cache: RwLock::new(None),
        }
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Register a user; names are unique
    pub fn create_user(&self, name: &str, email: Option<String>) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HangmanError::InvalidUserName {
                reason: "a user name is required".to_string(),
            }
            .into());
        }

        let user = User::new(name, email);
        self.store.insert_user(user.clone())?;
        self.metrics.record_user_created();

        info!(user = %user.name, "User created");
        Ok(user)
    }

    pub fn get_user(&self, name: &str) -> Result<User> {
        self.store
            .get_user(name)?
            .ok_or_else(|| HangmanError::UserNotFound {
                user_id: name.to_string(),
            })
            .map_err(Into::into)
    }

    /// Start a new game for an existing user
    pub fn new_game(
        &self,
        user_name: &str,
        target_word: &str,
        difficulty: Option<Difficulty>,
    ) -> Result<GameView> {
        let user = self.get_user(user_name)?;
        let game = self
            .calculator
            .new_game(generate_game_id(), user.name, target_word, difficulty)?;
        let view = game.view();

        self.store.insert_game(game)?;
        self.metrics.record_game_created(view.wrong_guesses_allowed);
        self.refresh_average_cache()?;

        info!(
            game_id = %view.game_id,
            user = %view.user_id,
            word_length = view.target_word_length,
            wrong_guesses_allowed = view.wrong_guesses_allowed,
            "Game created"
        );
        Ok(view)
    }

    pub fn get_game(&self, game_id: &GameId) -> Result<GameView> {
        self.load_game(game_id).map(|game| game.view())
    }

    /// Guess a letter; completes the game and records its score when the
    /// guess ends it
    pub fn make_move(&self, game_id: &GameId, guess: &str) -> Result<MoveResult> {
        let timer = self.metrics.start_timer();
        let lock = self.owner_lock(game_id)?;
        let _guard = acquire(&lock)?;
        let mut game = self.load_game(game_id)?;

        let record = match self.calculator.record_guess(&mut game, guess) {
            Ok(record) => record,
            Err(e) => {
                let reason = match as_hangman_error(&e) {
                    Some(HangmanError::InvalidState { .. }) => "game_over",
                    Some(HangmanError::InvalidGuess { .. }) => "invalid_guess",
                    _ => "other",
                };
                self.metrics.record_guess_rejected(reason);
                warn!(game_id = %game_id, guess = %guess, error = %e, "Guess rejected");
                return Err(e);
            }
        };
        self.metrics.record_guess(record.outcome);

        let mut message = match record.outcome {
            GuessOutcome::Correct => "Correct letter guess!".to_string(),
            GuessOutcome::Wrong => "Wrong letter guess!".to_string(),
        };

        let view = game.view();
        let score = match game.status() {
            GameStatus::InProgress => {
                self.store.save_game(game)?;
                None
            }
            GameStatus::Won => {
                message.push_str(" You win!");
                Some(self.complete(game)?)
            }
            GameStatus::Lost => {
                message.push_str(" Game over!");
                Some(self.complete(game)?)
            }
        };

        self.metrics.record_operation("make_move", timer.stop());

        Ok(MoveResult {
            game: view,
            guess: record,
            message,
            score,
        })
    }

    /// Re-run completion for a finished game. Safe to call repeatedly; the
    /// user's counters change at most once per game.
    pub fn complete_game(&self, game_id: &GameId) -> Result<Score> {
        let lock = self.owner_lock(game_id)?;
        let _guard = acquire(&lock)?;
        let game = self.load_game(game_id)?;
        if let Some(score) = self.store.get_score(game_id)? {
            debug!(game_id = %game_id, "Game already completed");
            self.metrics
                .record_game_completed(game.status(), score.final_score, false);
            return Ok(score);
        }
        self.complete(game)
    }

    /// Delete an in-progress game
    pub fn cancel_game(&self, game_id: &GameId) -> Result<()> {
        let lock = self.owner_lock(game_id)?;
        let _guard = acquire(&lock)?;
        let game = self.load_game(game_id)?;
        if game.is_over() {
            return Err(HangmanError::InvalidState {
                reason: format!("game {} is already over", game_id),
            }
            .into());
        }

        if self.store.delete_game(game_id)? {
            self.metrics.record_game_cancelled();
            self.refresh_average_cache()?;
            info!(game_id = %game_id, user = %game.user_id(), "Game cancelled");
        }
        Ok(())
    }

    pub fn get_scores(&self) -> Result<Vec<Score>> {
        self.store.list_scores()
    }

    pub fn get_user_scores(&self, user_name: &str) -> Result<Vec<Score>> {
        let user = self.get_user(user_name)?;
        self.store.list_user_scores(&user.name)
    }

    /// Highest scores first; `limit` defaults to the configured table size
    pub fn get_high_scores(&self, limit: Option<usize>) -> Result<Vec<Score>> {
        let limit = limit.unwrap_or(self.high_scores_limit);
        Ok(scoring::high_scores(self.store.list_scores()?, limit))
    }

    /// Users that have played, ordered by win percentage, average score and
    /// games played
    pub fn get_user_rankings(&self) -> Result<Vec<RankingEntry>> {
        let users = self.store.list_users()?;
        Ok(scoring::rank_users(&self.calculator, &users))
    }

    /// A single user's counters and derived metrics
    pub fn get_user_ranking(&self, user_name: &str) -> Result<RankingEntry> {
        let user = self.get_user(user_name)?;
        Ok(RankingEntry::from_user(&self.calculator, &user))
    }

    pub fn get_game_history(&self, game_id: &GameId) -> Result<Vec<GuessRecord>> {
        Ok(self.load_game(game_id)?.guess_history().to_vec())
    }

    /// A user's in-progress games
    pub fn get_user_games(&self, user_name: &str) -> Result<Vec<GameView>> {
        let user = self.get_user(user_name)?;
        Ok(self
            .store
            .list_user_games(&user.name, true)?
            .iter()
            .map(|game| game.view())
            .collect())
    }

    /// Cached mean remaining allowance over in-progress games
    pub fn average_wrong_guesses_remaining(&self) -> Option<f64> {
        self.average_cache.read().map(|cache| *cache).unwrap_or(None)
    }

    /// Recompute the cached mean remaining allowance
    pub fn refresh_average_cache(&self) -> Result<Option<f64>> {
        let games = self.store.list_active_games()?;
        let average = scoring::average_wrong_guesses_remaining(&games);

        let mut cache = self
            .average_cache
            .write()
            .map_err(|_| HangmanError::InternalError {
                message: "Failed to acquire average cache lock".to_string(),
            })?;
        *cache = average;

        Ok(average)
    }

    pub fn stats(&self) -> Result<GameStats> {
        Ok(GameStats {
            users: self.store.user_count()?,
            active_games: self.store.list_active_games()?.len(),
            completed_games: self.store.list_scores()?.len(),
            average_wrong_guesses_remaining: self.average_wrong_guesses_remaining(),
        })
    }

    fn load_game(&self, game_id: &GameId) -> Result<crate::game::Game> {
        self.store
            .get_game(game_id)?
            .ok_or_else(|| HangmanError::GameNotFound {
                game_id: game_id.to_string(),
            })
            .map_err(Into::into)
    }

    fn user_lock(&self, user_id: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .user_locks
            .lock()
            .map_err(|_| HangmanError::InternalError {
                message: "Failed to acquire user lock table".to_string(),
            })?;
        Ok(locks.entry(user_id.to_string()).or_default().clone())
    }

    /// Lock of the user owning the game
    fn owner_lock(&self, game_id: &GameId) -> Result<Arc<Mutex<()>>> {
        let game = self.load_game(game_id)?;
        self.user_lock(game.user_id())
    }

    /// Finalize a finished game, apply its result to the owner and commit
    /// all three records together. The caller holds the owner's lock.
    fn complete(&self, game: crate::game::Game) -> Result<Score> {
        let score = self.calculator.finalize_game(&game)?;
        let status = game.status();

        let mut user = self.get_user(game.user_id())?;
        self.calculator.apply_result(&mut user, &score)?;

        let committed = self
            .store
            .commit_completion(game, score.clone(), user)?;
        self.metrics
            .record_game_completed(status, score.final_score, committed);

        if committed {
            info!(
                game_id = %score.game_id,
                user = %score.user_id,
                won = score.won,
                final_score = score.final_score,
                "Game completed"
            );
            self.refresh_average_cache()?;
            Ok(score)
        } else {
            // another completion won the race; report the stored score
            Ok(self.store.get_score(&score.game_id)?.unwrap_or(score))
        }
    }
}

fn acquire(lock: &Mutex<()>) -> Result<MutexGuard<'_, ()>> {
    lock.lock().map_err(|_| {
        HangmanError::InternalError {
            message: "Failed to acquire user lock".to_string(),
        }
        .into()
    })
}
