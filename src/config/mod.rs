//! Configuration management for the hangman-ledger service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the game rules.

pub mod app;
pub mod game;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, GameSettings, ServiceSettings};
pub use game::{Difficulty, GameConfig, MAX_WRONG_GUESSES};
