use thiserror::Error;

/// Failures while resolving the current user
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Inactive user")]
    InactiveUser,
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::UserNotFound => 1003,
            AuthError::InactiveUser => 1004,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
