//! In-memory game storage

use crate::error::{HangmanError, Result};
use crate::game::Game;
use crate::storage::GameStore;
use crate::types::{GameId, Score, User, UserId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    games: HashMap<GameId, Game>,
    scores: Vec<Score>,
    score_index: HashMap<GameId, usize>,
}

/// In-memory storage guarded by a single lock, so every write is atomic
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    state: RwLock<StoreState>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| {
            HangmanError::InternalError {
                message: "Failed to acquire store read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| {
            HangmanError::InternalError {
                message: "Failed to acquire store write lock".to_string(),
            }
            .into()
        })
    }
}

fn sorted_by_creation(mut games: Vec<Game>) -> Vec<Game> {
    games.sort_by_key(|game| game.created_at());
    games
}

impl GameStore for InMemoryGameStore {
    fn insert_user(&self, user: User) -> Result<()> {
        let mut state = self.write()?;

        if state.users.contains_key(&user.name) {
            return Err(HangmanError::UserAlreadyExists { user_id: user.name }.into());
        }

        state.users.insert(user.name.clone(), user);
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    fn user_count(&self) -> Result<usize> {
        Ok(self.read()?.users.len())
    }

    fn insert_game(&self, game: Game) -> Result<()> {
        let mut state = self.write()?;

        if !state.users.contains_key(game.user_id()) {
            return Err(HangmanError::UserNotFound {
                user_id: game.user_id().clone(),
            }
            .into());
        }

        state.games.insert(game.id(), game);
        Ok(())
    }

    fn save_game(&self, game: Game) -> Result<()> {
        let mut state = self.write()?;

        if game.is_over() {
            return Err(HangmanError::InvalidState {
                reason: format!("game {} is over and must be committed", game.id()),
            }
            .into());
        }

        match state.games.get(&game.id()) {
            Some(stored) if stored.is_over() => Err(HangmanError::InvalidState {
                reason: format!("game {} is already completed", game.id()),
            }
            .into()),
            Some(_) => {
                state.games.insert(game.id(), game);
                Ok(())
            }
            None => Err(HangmanError::GameNotFound {
                game_id: game.id().to_string(),
            }
            .into()),
        }
    }

    fn get_game(&self, game_id: &GameId) -> Result<Option<Game>> {
        Ok(self.read()?.games.get(game_id).cloned())
    }

    fn delete_game(&self, game_id: &GameId) -> Result<bool> {
        Ok(self.write()?.games.remove(game_id).is_some())
    }

    fn list_user_games(&self, user_id: &str, active_only: bool) -> Result<Vec<Game>> {
        let state = self.read()?;
        let games = state
            .games
            .values()
            .filter(|game| game.user_id() == user_id)
            .filter(|game| !active_only || !game.is_over())
            .cloned()
            .collect();

        Ok(sorted_by_creation(games))
    }

    fn list_active_games(&self) -> Result<Vec<Game>> {
        let state = self.read()?;
        let games = state
            .games
            .values()
            .filter(|game| !game.is_over())
            .cloned()
            .collect();

        Ok(sorted_by_creation(games))
    }

    fn list_scores(&self) -> Result<Vec<Score>> {
        Ok(self.read()?.scores.clone())
    }

    fn list_user_scores(&self, user_id: &str) -> Result<Vec<Score>> {
        Ok(self
            .read()?
            .scores
            .iter()
            .filter(|score| score.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_score(&self, game_id: &GameId) -> Result<Option<Score>> {
        let state = self.read()?;
        Ok(state
            .score_index
            .get(game_id)
            .and_then(|&idx| state.scores.get(idx))
            .cloned())
    }

    fn commit_completion(&self, game: Game, score: Score, user: User) -> Result<bool> {
        let mut state = self.write()?;

        if state.score_index.contains_key(&score.game_id) {
            debug!(game_id = %score.game_id, "Completion already committed");
            return Ok(false);
        }

        if !game.is_over() || score.game_id != game.id() || &score.user_id != game.user_id() {
            return Err(HangmanError::InvalidState {
                reason: format!("score does not match completed game {}", game.id()),
            }
            .into());
        }
        if user.name != score.user_id {
            return Err(HangmanError::InvalidState {
                reason: format!("user '{}' does not own game {}", user.name, game.id()),
            }
            .into());
        }
        if !user.has_recorded(&score.game_id) {
            return Err(HangmanError::InvalidState {
                reason: format!(
                    "result of game {} was not applied to '{}'",
                    game.id(),
                    user.name
                ),
            }
            .into());
        }

        // the snapshot must be the stored user plus exactly this result
        let Some(stored) = state.users.get(&user.name) else {
            return Err(HangmanError::UserNotFound { user_id: user.name }.into());
        };
        let stale = user.games_played != stored.games_played + 1
            || user.recorded_games.len() != stored.recorded_games.len() + 1
            || !stored.recorded_games.is_subset(&user.recorded_games)
            || stored.has_recorded(&score.game_id);
        if stale {
            return Err(HangmanError::InvalidState {
                reason: format!(
                    "user '{}' changed since the result of game {} was applied",
                    user.name,
                    game.id()
                ),
            }
            .into());
        }

        let idx = state.scores.len();
        state.score_index.insert(score.game_id, idx);
        state.scores.push(score);
        state.games.insert(game.id(), game);
        state.users.insert(user.name.clone(), user);

        Ok(true)
    }
}
