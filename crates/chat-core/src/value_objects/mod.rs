//! Value objects - immutable types that represent domain concepts

mod ids;

pub use ids::{ChannelId, IdParseError, MessageId, MessageIdGenerator, MessageKind, UserId};
