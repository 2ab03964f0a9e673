//! Hangman games: target words and the per-game state machine

pub mod state;
pub mod word;

pub use state::{Game, GameView};
pub use word::TargetWord;
