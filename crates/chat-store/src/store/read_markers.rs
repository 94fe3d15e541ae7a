//! Read markers - how far into each channel the local user has read
//!
//! Channels are append-only, so a marker is just the number of top-level
//! messages that had been seen when the channel was last marked read.

use chat_core::ChannelId;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ReadMarkers {
    seen: HashMap<ChannelId, usize>,
}

impl ReadMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the first `seen` messages of the channel have been read.
    /// Returns `false` if the marker was already there.
    pub fn mark(&mut self, channel_id: &ChannelId, seen: usize) -> bool {
        let marker = self.seen.entry(channel_id.clone()).or_insert(0);
        if *marker >= seen {
            return false;
        }
        *marker = seen;
        true
    }

    /// Number of messages past the marker, given the channel's current length
    pub fn unread(&self, channel_id: &ChannelId, total: usize) -> usize {
        total.saturating_sub(self.seen.get(channel_id).copied().unwrap_or(0))
    }
}
