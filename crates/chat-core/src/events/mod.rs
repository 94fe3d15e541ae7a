//! Domain events

mod domain_event;

pub use domain_event::{
    ChannelReadEvent, DomainEvent, EventOrigin, MessageCreatedEvent, ReactionEvent,
    ReplyAddedEvent, ThreadSelectionChangedEvent,
};
