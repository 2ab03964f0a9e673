//! Rankings, high score tables and aggregate game statistics

use crate::game::Game;
use crate::scoring::calculator::ScoreCalculator;
use crate::types::{Score, User, UserId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the user rankings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub user_id: UserId,
    pub email: Option<String>,
    pub wins: u64,
    pub games_played: u64,
    pub total_score: u64,
    pub win_percentage: f64,
    pub average_score: f64,
}

impl RankingEntry {
    pub fn from_user(calculator: &ScoreCalculator, user: &User) -> Self {
        let metrics = calculator.ranking_metrics(user);
        Self {
            user_id: user.name.clone(),
            email: user.email.clone(),
            wins: user.wins,
            games_played: user.games_played,
            total_score: user.total_score,
            win_percentage: metrics.win_percentage,
            average_score: metrics.average_score,
        }
    }
}

/// Rank every user that has played at least one game.
///
/// Ordered by win percentage, then average score, then games played, all
/// descending; remaining ties are broken by user name.
pub fn rank_users<'a>(
    calculator: &ScoreCalculator,
    users: impl IntoIterator<Item = &'a User>,
) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = users
        .into_iter()
        .filter(|user| user.games_played > 0)
        .map(|user| RankingEntry::from_user(calculator, user))
        .collect();

    entries.sort_by(|a, b| {
        b.win_percentage
            .partial_cmp(&a.win_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.average_score
                    .partial_cmp(&a.average_score)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.games_played.cmp(&a.games_played))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries
}

/// The `limit` highest scores, best first
pub fn high_scores(mut scores: Vec<Score>, limit: usize) -> Vec<Score> {
    scores.sort_by(|a, b| b.final_score.cmp(&a.final_score));
    scores.truncate(limit);
    scores
}

/// Mean remaining wrong-guess allowance over the in-progress games
pub fn average_wrong_guesses_remaining<'a>(
    games: impl IntoIterator<Item = &'a Game>,
) -> Option<f64> {
    let (count, total) = games
        .into_iter()
        .filter(|game| !game.is_over())
        .fold((0u64, 0u64), |(count, total), game| {
            (count + 1, total + u64::from(game.wrong_guesses_remaining()))
        });

    if count == 0 {
        None
    } else {
        Some(total as f64 / count as f64)
    }
}
