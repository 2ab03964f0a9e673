//! Score calculation for completed games
//!
//! [`ScoreCalculator`] owns the scoring rules: it applies guesses to games,
//! turns finished games into scores, folds scores into user counters and
//! derives the ranking metrics from those counters.

use crate::config::game::{Difficulty, GameConfig};
use crate::error::{HangmanError, Result};
use crate::game::{Game, TargetWord};
use crate::types::{GameId, GameStatus, GuessRecord, Score, User, UserId};
use crate::utils::{current_date, normalize_guess};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Ranking metrics derived from a user's counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingMetrics {
    /// wins / games_played, in [0, 1]
    pub win_percentage: f64,
    /// total_score / wins, in [0, 10]
    pub average_score: f64,
}

/// Scoring and ranking rules for hangman games
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    config: GameConfig,
}

impl ScoreCalculator {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Create a game for `user_id`, using the configured default difficulty
    /// when none is given
    pub fn new_game(
        &self,
        game_id: GameId,
        user_id: UserId,
        target_word: &str,
        difficulty: Option<Difficulty>,
    ) -> Result<Game> {
        let word = TargetWord::parse(target_word, self.config.min_target_word_length)?;
        let difficulty = difficulty.unwrap_or(self.config.default_difficulty);
        Game::new(game_id, user_id, word, difficulty)
    }

    /// Apply one letter guess to an in-progress game
    pub fn record_guess(&self, game: &mut Game, guess: &str) -> Result<GuessRecord> {
        if game.is_over() {
            return Err(HangmanError::InvalidState {
                reason: format!(
                    "cannot guess on game {}, it is already {}",
                    game.id(),
                    game.status()
                ),
            }
            .into());
        }

        let letter = normalize_guess(guess)?;
        let record = game.apply_guess(letter)?;

        debug!(
            game_id = %game.id(),
            letter = %record.letter,
            outcome = ?record.outcome,
            remaining = record.wrong_guesses_remaining,
            "Guess recorded"
        );

        Ok(record)
    }

    /// Produce the score of a finished game
    pub fn finalize_game(&self, game: &Game) -> Result<Score> {
        let won = match game.status() {
            GameStatus::Won => true,
            GameStatus::Lost => false,
            GameStatus::InProgress => {
                return Err(HangmanError::InvalidState {
                    reason: format!("game {} is still in progress", game.id()),
                }
                .into())
            }
        };

        let final_score = if won {
            game.wrong_guesses_remaining()
        } else {
            0
        };

        Ok(Score {
            game_id: game.id(),
            user_id: game.user_id().clone(),
            date: current_date(),
            won,
            wrong_guesses: game.wrong_guesses_made(),
            final_score,
        })
    }

    /// Fold a score into the user's counters.
    ///
    /// Returns `false` without changing anything when the game's result has
    /// already been applied.
    pub fn apply_result(&self, user: &mut User, score: &Score) -> Result<bool> {
        if score.user_id != user.name {
            return Err(HangmanError::InvalidState {
                reason: format!(
                    "score for game {} belongs to '{}', not '{}'",
                    score.game_id, score.user_id, user.name
                ),
            }
            .into());
        }

        if !user.recorded_games.insert(score.game_id) {
            debug!(
                user = %user.name,
                game_id = %score.game_id,
                "Result already applied, skipping"
            );
            return Ok(false);
        }

        user.games_played += 1;
        if score.won {
            user.wins += 1;
            user.total_score += u64::from(score.final_score);
        }

        info!(
            user = %user.name,
            game_id = %score.game_id,
            won = score.won,
            final_score = score.final_score,
            games_played = user.games_played,
            "Applied game result"
        );

        Ok(true)
    }

    /// Derive win percentage and average score without mutating the user
    pub fn ranking_metrics(&self, user: &User) -> RankingMetrics {
        let win_percentage = if user.games_played > 0 {
            user.wins as f64 / user.games_played as f64
        } else {
            0.0
        };

        let average_score = if user.wins > 0 {
            user.total_score as f64 / user.wins as f64
        } else {
            0.0
        };

        RankingMetrics {
            win_percentage,
            average_score,
        }
    }
}
