//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{IdParseError, MessageId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] IdParseError),

    #[error("Invalid emoji: {0:?}")]
    InvalidEmoji(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },
}

impl DomainError {
    /// Get an error code string for responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidEmoji(_) => "INVALID_EMOJI",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId(_) | Self::InvalidEmoji(_) | Self::ContentTooLong { .. }
        )
    }
}
