//! Custom error types for the presenter layer.

use thiserror::Error;

use fitness_companion_core::activity::ActivityError;
use fitness_companion_core::profile_setup::ProfileSetupError;
use fitness_companion_core::store::StoreError;
use fitness_companion_core::validation::ValidationError;

/// Presenter errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("news error: {0}")]
    News(#[from] fitness_companion_core::NewsError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("activity error: {0}")]
    Activity(#[from] ActivityError),

    #[error("profile setup error: {0}")]
    ProfileSetup(#[from] ProfileSetupError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown inline to the user. Validation failures already carry
    /// their wording; everything else is prefixed the way the feed shows it.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(v) => v.to_string(),
            AppError::News(e) => format!("Error: {e}"),
            other => format!("Error: {other}"),
        }
    }
}

/// Result type alias for presenter operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_unprefixed() {
        let err = AppError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match.");
    }

    #[test]
    fn news_message_is_prefixed() {
        let err = AppError::from(fitness_companion_core::NewsError::Auth("bad key".into()));
        assert_eq!(err.user_message(), "Error: authentication failed: bad key");
    }
}
