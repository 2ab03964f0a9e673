//! Service layer for the hangman-ledger service
//!
//! This module contains the game operations, the application state that
//! coordinates components and background tasks, and health checks.

pub mod app;
pub mod hangman;
pub mod health;

pub use app::{AppState, ServiceError};
pub use hangman::{GameStats, HangmanService, MoveResult};
pub use health::{HealthCheck, HealthStatus};
