//! Domain events - events emitted when store state changes
//!
//! These events are used for:
//! - Letting the backend adapter persist locally created messages and reactions
//! - Re-rendering views that subscribe to the store
//! - Debug logging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Message, Reply, ThreadSelection};
use crate::value_objects::{ChannelId, MessageId, UserId};

/// Where a change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrigin {
    /// Made in this session; the adapter still has to persist it
    Local,
    /// Merged from the backend; already persisted
    Remote,
}

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Message Events
    // =========================================================================
    MessageCreated(MessageCreatedEvent),
    ReplyAdded(ReplyAddedEvent),

    // =========================================================================
    // Reaction Events
    // =========================================================================
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),

    // =========================================================================
    // View Events
    // =========================================================================
    ThreadSelectionChanged(ThreadSelectionChangedEvent),
    ChannelRead(ChannelReadEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "MESSAGE_CREATED",
            Self::ReplyAdded(_) => "REPLY_ADDED",
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::ThreadSelectionChanged(_) => "THREAD_SELECTION_CHANGED",
            Self::ChannelRead(_) => "CHANNEL_READ",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MessageCreated(e) => e.timestamp,
            Self::ReplyAdded(e) => e.timestamp,
            Self::ReactionAdded(e) | Self::ReactionRemoved(e) => e.timestamp,
            Self::ThreadSelectionChanged(e) => e.timestamp,
            Self::ChannelRead(e) => e.timestamp,
        }
    }

    /// Channel the event belongs to, if any
    pub fn channel_id(&self) -> Option<&ChannelId> {
        match self {
            Self::MessageCreated(e) => Some(&e.message.channel_id),
            Self::ReplyAdded(e) => Some(&e.reply.channel_id),
            Self::ReactionAdded(e) | Self::ReactionRemoved(e) => Some(&e.channel_id),
            Self::ThreadSelectionChanged(e) => e.selection.as_ref().map(|s| &s.channel_id),
            Self::ChannelRead(e) => Some(&e.channel_id),
        }
    }

    /// Whether the backend adapter still needs to persist this change
    pub fn needs_persisting(&self) -> bool {
        match self {
            Self::MessageCreated(e) => e.origin == EventOrigin::Local,
            Self::ReplyAdded(e) => e.origin == EventOrigin::Local,
            Self::ReactionAdded(_) | Self::ReactionRemoved(_) => true,
            Self::ThreadSelectionChanged(_) | Self::ChannelRead(_) => false,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreatedEvent {
    pub origin: EventOrigin,
    pub message: Message,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyAddedEvent {
    pub origin: EventOrigin,
    pub reply: Reply,
    pub reply_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSelectionChangedEvent {
    pub selection: Option<ThreadSelection>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReadEvent {
    pub channel_id: ChannelId,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl MessageCreatedEvent {
    pub fn new(origin: EventOrigin, message: Message) -> Self {
        Self {
            origin,
            message,
            timestamp: Utc::now(),
        }
    }
}

impl ReplyAddedEvent {
    pub fn new(origin: EventOrigin, reply: Reply, reply_count: usize) -> Self {
        Self {
            origin,
            reply,
            reply_count,
            timestamp: Utc::now(),
        }
    }
}

impl ReactionEvent {
    pub fn new(channel_id: ChannelId, message_id: MessageId, user_id: UserId, emoji: String) -> Self {
        Self {
            channel_id,
            message_id,
            user_id,
            emoji,
            timestamp: Utc::now(),
        }
    }
}

impl ThreadSelectionChangedEvent {
    pub fn new(selection: Option<ThreadSelection>) -> Self {
        Self {
            selection,
            timestamp: Utc::now(),
        }
    }
}

impl ChannelReadEvent {
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewMessage;

    #[test]
    fn test_event_serialization() {
        let message = Message::new(
            MessageId::new("msg-1"),
            ChannelId::new("general"),
            NewMessage::new("u1", "Alice", "hello"),
        );
        let event = DomainEvent::MessageCreated(MessageCreatedEvent::new(EventOrigin::Local, message));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("MESSAGE_CREATED"));
        assert!(json.contains("\"origin\":\"local\""));

        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "MESSAGE_CREATED");
        assert_eq!(parsed.channel_id(), Some(&ChannelId::new("general")));
    }

    #[test]
    fn test_needs_persisting() {
        let reaction = DomainEvent::ReactionAdded(ReactionEvent::new(
            ChannelId::new("general"),
            MessageId::new("msg-1"),
            UserId::new("u2"),
            "👍".to_string(),
        ));
        assert!(reaction.needs_persisting());

        let closed = DomainEvent::ThreadSelectionChanged(ThreadSelectionChangedEvent::new(None));
        assert!(!closed.needs_persisting());
        assert_eq!(closed.channel_id(), None);
    }
}
