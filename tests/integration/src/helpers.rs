//! Test helpers for integration tests
//!
//! Provides a test application wired the same way the replay binary wires
//! it, plus an event log that records every store change.

use std::sync::Arc;

use chat_common::AppConfig;
use chat_core::{ChannelId, MessageId};
use chat_service::{
    ChannelService, MessageService, ReactionService, ServiceContext, ThreadService,
};
use chat_store::{EventLog, MessageStore};

use crate::fixtures::TestUser;

/// Service context plus a log of every event it published
pub struct TestApp {
    pub ctx: ServiceContext,
    pub events: Arc<EventLog>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let events = Arc::new(EventLog::new());
        let ctx = ServiceContext::builder()
            .config(config)
            .store(MessageStore::new().with_sink(events.clone()))
            .build()
            .expect("test config is valid");
        Self { ctx, events }
    }

    pub fn messages(&self) -> MessageService<'_> {
        MessageService::new(&self.ctx)
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn threads(&self) -> ThreadService<'_> {
        ThreadService::new(&self.ctx)
    }

    pub fn channels(&self) -> ChannelService<'_> {
        ChannelService::new(&self.ctx)
    }

    /// Post as `user` and return the new message id
    pub fn post(&self, channel: &ChannelId, user: &TestUser, content: &str) -> MessageId {
        let sent = self
            .messages()
            .send_message(channel, user.says(content))
            .expect("send_message failed")
            .expect("content was blank");
        MessageId::new(sent.id)
    }

    /// Reply as `user` and return the new reply id
    pub fn reply(
        &self,
        channel: &ChannelId,
        parent: &MessageId,
        user: &TestUser,
        content: &str,
    ) -> MessageId {
        let sent = self
            .messages()
            .send_reply(channel, parent, user.says(content))
            .expect("send_reply failed")
            .expect("content was blank");
        MessageId::new(sent.id)
    }

    /// Event type tags recorded since the last call
    pub fn take_event_types(&self) -> Vec<&'static str> {
        self.events.take().iter().map(chat_core::DomainEvent::event_type).collect()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn general() -> ChannelId {
    ChannelId::new("general")
}
