//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller passed incomplete or malformed data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mock login rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an authentication error with message
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::validation("cabinet number cannot be empty");
        assert_eq!(err.to_string(), "Validation error: cabinet number cannot be empty");

        let err = AppError::authentication("unknown user");
        assert_eq!(err.to_string(), "Authentication failed: unknown user");
    }
}
