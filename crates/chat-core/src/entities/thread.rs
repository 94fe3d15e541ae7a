//! Thread selection - which thread, if any, is open in the side panel

use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelId, MessageId};

/// An open thread: the root message it hangs off and that message's channel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadSelection {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

impl ThreadSelection {
    pub fn new(channel_id: impl Into<ChannelId>, message_id: impl Into<MessageId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        }
    }

    /// Check if this selection points at the given root message
    #[inline]
    pub fn is_for(&self, channel_id: &ChannelId, message_id: &MessageId) -> bool {
        &self.channel_id == channel_id && &self.message_id == message_id
    }
}
