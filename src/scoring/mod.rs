//! Scoring and ranking of hangman games
//!
//! This module turns guesses into game outcomes, completed games into
//! scores, and user counters into rankings.

pub mod calculator;
pub mod ranking;

// Re-export commonly used types
pub use calculator::{RankingMetrics, ScoreCalculator};
pub use ranking::{average_wrong_guesses_remaining, high_scores, rank_users, RankingEntry};
