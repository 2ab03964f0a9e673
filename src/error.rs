//! Error types for the hangman service
//!
//! Fallible operations return an anyhow-based [`Result`]; domain failures are
//! raised as [`HangmanError`] and can be recovered with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific game scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HangmanError {
    #[error("Invalid guess: {reason}")]
    InvalidGuess { reason: String },

    #[error("Invalid game state: {reason}")]
    InvalidState { reason: String },

    #[error("Invalid target word: {reason}")]
    InvalidTargetWord { reason: String },

    #[error("Invalid difficulty: {reason}")]
    InvalidDifficulty { reason: String },

    #[error("Invalid user name: {reason}")]
    InvalidUserName { reason: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("A user named '{user_id}' already exists")]
    UserAlreadyExists { user_id: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}

impl HangmanError {
    /// Whether the error is caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            HangmanError::ConfigurationError { .. } | HangmanError::InternalError { .. }
        )
    }
}

/// Extract the domain error from an anyhow error, if there is one
pub fn as_hangman_error(err: &anyhow::Error) -> Option<&HangmanError> {
    err.downcast_ref::<HangmanError>()
}
