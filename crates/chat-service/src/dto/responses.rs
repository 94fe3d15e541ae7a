//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize` for JSON output. Identifiers are
//! plain strings.

use chat_core::ReactionCount;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Message Responses
// ============================================================================

/// Attachment response
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub filename: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub is_image: bool,
}

/// Root message as seen by one viewer
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    /// Content rendered to an HTML fragment
    pub content_html: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<ReactionCount>,
    pub reply_count: usize,
    /// Sorted participant user ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thread_participants: Vec<String>,
    pub last_activity: DateTime<Utc>,
}

/// Reply in a thread as seen by one viewer
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: String,
    pub parent_id: String,
    pub channel_id: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub content_html: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<ReactionCount>,
}

/// Message list entry with its grouping flag
#[derive(Debug, Clone, Serialize)]
pub struct MessageListItem {
    #[serde(flatten)]
    pub message: MessageResponse,
    /// Whether the message opens a new author header
    pub show_header: bool,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Outcome of a reaction change
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub message_id: String,
    pub emoji: String,
    /// Whether the store changed
    pub changed: bool,
    /// Whether the viewer now has this reaction
    pub reacted: bool,
    pub reactions: Vec<ReactionCount>,
}

// ============================================================================
// Thread Responses
// ============================================================================

/// Open thread panel
#[derive(Debug, Clone, Serialize)]
pub struct ThreadResponse {
    pub root: MessageResponse,
    pub replies: Vec<ReplyResponse>,
}

// ============================================================================
// Channel Responses
// ============================================================================

/// Sidebar entry for a channel
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummaryResponse {
    pub channel_id: String,
    pub is_direct_message: bool,
    pub message_count: usize,
    pub unread: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}
