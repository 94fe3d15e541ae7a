//! Channel service
//!
//! Read markers, unread counts and sidebar summaries.

use chat_core::ChannelId;
use chat_presentation::unread_badge;
use tracing::{info, instrument};

use crate::dto::ChannelSummaryResponse;

use super::context::ServiceContext;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark everything currently in the channel as read
    #[instrument(skip(self))]
    pub fn mark_read(&self, channel_id: &ChannelId) {
        self.ctx.lock().mark_channel_read(channel_id);
        info!("Channel marked read");
    }

    pub fn unread_count(&self, channel_id: &ChannelId) -> usize {
        self.ctx.lock().unread_count(channel_id)
    }

    /// Sidebar badge text for the channel, `None` when fully read
    pub fn unread_badge(&self, channel_id: &ChannelId) -> Option<String> {
        unread_badge(self.unread_count(channel_id))
    }

    /// Every channel with messages, sorted by id
    pub fn channel_summaries(&self) -> Vec<ChannelSummaryResponse> {
        let store = self.ctx.lock();
        let mut channel_ids: Vec<&ChannelId> = store.channel_ids().collect();
        channel_ids.sort();

        channel_ids
            .into_iter()
            .map(|channel_id| {
                let unread = store.unread_count(channel_id);
                ChannelSummaryResponse {
                    channel_id: channel_id.to_string(),
                    is_direct_message: channel_id.is_direct_message(),
                    message_count: store.message_count(channel_id),
                    unread,
                    badge: unread_badge(unread),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_common::AppConfig;
    use chat_core::NewMessage;

    #[test]
    fn test_unread_badge_cap() {
        let ctx = ServiceContext::new(AppConfig::default());
        let channel = ChannelId::new("busy");
        {
            let mut store = ctx.lock();
            for i in 0..120 {
                store.post_message(&channel, NewMessage::new("u2", "Bob", format!("#{i}")));
            }
        }
        let service = ChannelService::new(&ctx);
        assert_eq!(service.unread_count(&channel), 120);
        assert_eq!(service.unread_badge(&channel).as_deref(), Some("99+"));

        service.mark_read(&channel);
        assert_eq!(service.unread_badge(&channel), None);
    }

    #[test]
    fn test_channel_summaries() {
        let ctx = ServiceContext::new(AppConfig::default());
        {
            let mut store = ctx.lock();
            store.post_message(&ChannelId::new("random"), NewMessage::new("u1", "Alice", "a"));
            store.post_message(&ChannelId::new("dm-u1-u2"), NewMessage::new("u2", "Bob", "b"));
            store.post_message(&ChannelId::new("dm-u1-u2"), NewMessage::new("u2", "Bob", "c"));
        }
        let summaries = ChannelService::new(&ctx).channel_summaries();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].channel_id, "dm-u1-u2");
        assert!(summaries[0].is_direct_message);
        assert_eq!(summaries[0].unread, 2);
        assert_eq!(summaries[0].badge.as_deref(), Some("2"));
        assert_eq!(summaries[1].channel_id, "random");
        assert!(!summaries[1].is_direct_message);
    }
}
