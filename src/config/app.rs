//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! hangman-ledger service, including environment variable and TOML file
//! loading and validation.

use crate::config::game::{
    Difficulty, GameConfig, DEFAULT_MIN_TARGET_WORD_LENGTH, MAX_WRONG_GUESSES,
};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub game: GameSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host for the health and metrics endpoints
    pub health_host: String,
    /// Port for the health and metrics endpoints
    pub health_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Game rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Wrong guesses permitted when a game is created without a difficulty
    pub wrong_guesses_allowed: u32,
    /// Minimum number of letters in a target word
    pub min_target_word_length: usize,
    /// Number of entries returned by the high score query by default
    pub high_scores_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "hangman-ledger".to_string(),
            log_level: "info".to_string(),
            health_host: "0.0.0.0".to_string(),
            health_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            wrong_guesses_allowed: MAX_WRONG_GUESSES,
            min_target_word_length: DEFAULT_MIN_TARGET_WORD_LENGTH,
            high_scores_limit: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HEALTH_HOST") {
            config.service.health_host = host;
        }
        if let Ok(port) = env::var("HEALTH_PORT") {
            config.service.health_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HEALTH_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Game settings
        if let Ok(allowed) = env::var("WRONG_GUESSES_ALLOWED") {
            config.game.wrong_guesses_allowed = allowed
                .parse()
                .map_err(|_| anyhow!("Invalid WRONG_GUESSES_ALLOWED value: {}", allowed))?;
        }
        if let Ok(min_len) = env::var("MIN_TARGET_WORD_LENGTH") {
            config.game.min_target_word_length = min_len
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_TARGET_WORD_LENGTH value: {}", min_len))?;
        }
        if let Ok(limit) = env::var("HIGH_SCORES_LIMIT") {
            config.game.high_scores_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid HIGH_SCORES_LIMIT value: {}", limit))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Game rules derived from the game settings
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            default_difficulty: Difficulty::Custom(self.game.wrong_guesses_allowed),
            min_target_word_length: self.game.min_target_word_length,
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }
    if config.service.health_port == 0 {
        return Err(anyhow!("Health port cannot be 0"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate game settings
    if config.game.wrong_guesses_allowed == 0
        || config.game.wrong_guesses_allowed > MAX_WRONG_GUESSES
    {
        return Err(anyhow!(
            "Wrong guesses allowed must be between 1 and {}",
            MAX_WRONG_GUESSES
        ));
    }
    if config.game.min_target_word_length == 0 {
        return Err(anyhow!("Minimum target word length must be greater than 0"));
    }
    if config.game.high_scores_limit == 0 {
        return Err(anyhow!("High scores limit must be greater than 0"));
    }

    Ok(())
}
