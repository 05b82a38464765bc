//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid score: {0}")]
    InvalidScore(String),
}

impl DomainError {
    /// Check if this error was caused by user input rather than system state
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::InvalidTopic(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_topic_display() {
        let error = DomainError::InvalidTopic("too short".to_string());
        assert_eq!(error.to_string(), "Invalid topic: too short");
    }

    #[test]
    fn test_is_input_error() {
        assert!(DomainError::InvalidTopic("x".to_string()).is_input_error());
        assert!(!DomainError::InvalidModel("x".to_string()).is_input_error());
    }
}
