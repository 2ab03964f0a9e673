//! Hangman Ledger - Scoring and ranking service for Hangman games
//!
//! This crate tracks Hangman games guess by guess, turns finished games into
//! score records, folds those results into per-user statistics exactly once,
//! and derives rankings and high-score tables from them.

pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod scoring;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{HangmanError, Result};
pub use types::*;

// Re-export key components
pub use game::{Game, GameView, TargetWord};
pub use scoring::{RankingEntry, RankingMetrics, ScoreCalculator};
pub use service::HangmanService;
pub use storage::{GameStore, InMemoryGameStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
