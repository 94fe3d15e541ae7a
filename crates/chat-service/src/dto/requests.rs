//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Message content length is checked by the service against the configured
//! limit, since it is not known at compile time.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Message Requests
// ============================================================================

/// Attachment reference sent along with a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachmentRequest {
    #[validate(length(min = 1, max = 255, message = "Filename must be 1-255 characters"))]
    pub filename: String,

    #[validate(url(message = "Attachment URL is not valid"))]
    pub url: String,

    pub content_type: Option<String>,
}

/// Composed message or reply
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 64, message = "Author ID must be 1-64 characters"))]
    pub author_id: String,

    #[validate(length(min = 1, max = 80, message = "Author name must be 1-80 characters"))]
    pub author_name: String,

    /// Raw composer text; trimmed before posting
    pub content: String,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<AttachmentRequest>,
}

impl SendMessageRequest {
    pub fn new(
        author_id: impl Into<String>,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            author_name: author_name.into(),
            content: content.into(),
            attachments: Vec::new(),
        }
    }
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Add, remove or toggle a reaction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionRequest {
    #[validate(length(min = 1, max = 64, message = "User ID must be 1-64 characters"))]
    pub user_id: String,

    /// Unicode emoji
    #[validate(length(min = 1, max = 64, message = "Emoji must be 1-64 characters"))]
    pub emoji: String,
}

impl ReactionRequest {
    pub fn new(user_id: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            emoji: emoji.into(),
        }
    }
}
