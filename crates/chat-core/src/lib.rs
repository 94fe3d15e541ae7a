//! # chat-core
//!
//! Domain layer containing identifiers, message/reaction entities, domain
//! events and the event sink port.
//! This crate has zero dependencies on infrastructure (backend client, UI, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AttachmentRef, Message, NewMessage, Post, Reaction, ReactionCount, Reactions, Reply,
    ThreadSelection,
};
pub use error::DomainError;
pub use events::{DomainEvent, EventOrigin};
pub use traits::EventSink;
pub use value_objects::{ChannelId, IdParseError, MessageId, MessageIdGenerator, MessageKind, UserId};
