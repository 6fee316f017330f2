/// Error types for lightning-flashcards
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::error::Error as StdError;
use thiserror::Error;

/// Main error type for flashcard operations
#[derive(Error, Debug)]
pub enum FlashcardError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, binding sockets, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Required input missing or empty
    #[error("{0}")]
    Validation(String),

    /// Nothing to route the request to
    #[error("Not Found")]
    NotFound,

    /// Request body could not be read as the expected JSON shape
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for flashcard operations
pub type Result<T> = std::result::Result<T, FlashcardError>;

impl FlashcardError {
    /// Convert FlashcardError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FlashcardError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            FlashcardError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            FlashcardError::Validation(reason) => reason.clone(),
            FlashcardError::NotFound => "Not Found".to_string(),
            FlashcardError::MalformedBody(e) => {
                format!("Request body could not be parsed: {}", e)
            }
            FlashcardError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            FlashcardError::Generic(msg) => msg.clone(),
        }
    }

    /// Whether the caller is at fault (as opposed to the server)
    pub fn is_client_error(&self) -> bool {
        matches!(self, FlashcardError::Validation(_) | FlashcardError::NotFound)
    }

    /// Messages of this error and every error that caused it, outermost first
    pub fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = StdError::source(self);

        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = FlashcardError::Validation("Front and back are required".to_string());
        assert_eq!(err.user_message(), "Front and back are required");

        let err = FlashcardError::Config("bad port".to_string());
        assert!(err.user_message().contains("bad port"));
    }

    #[test]
    fn test_error_display() {
        let err = FlashcardError::NotFound;
        assert_eq!(format!("{}", err), "Not Found");

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FlashcardError::from(parse_err);
        assert!(err.to_string().contains("Malformed request body"));
    }

    #[test]
    fn test_malformed_body_keeps_parser_cause() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FlashcardError::from(parse_err);

        let chain = err.chain();
        assert_eq!(chain.len(), 2);
        assert!(chain[1].contains("line 1"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(FlashcardError::Validation("x".to_string()).is_client_error());
        assert!(FlashcardError::NotFound.is_client_error());
        assert!(!FlashcardError::Generic("boom".to_string()).is_client_error());
    }

    #[test]
    fn test_chain_includes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = FlashcardError::from(io);

        let chain = err.chain();
        assert_eq!(chain.len(), 2);
        assert!(chain[0].starts_with("IO error"));
        assert_eq!(chain[1], "disk on fire");
    }
}
