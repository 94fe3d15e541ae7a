//! Service context - dependency container for services
//!
//! Holds the shared message store, the application config and the broadcast
//! sink that fans store events out to async subscribers.

use std::sync::Arc;

use chat_common::AppConfig;
use chat_core::DomainEvent;
use chat_presentation::Grouping;
use chat_store::{shared, BroadcastSink, MessageStore, SharedStore};
use parking_lot::MutexGuard;
use tokio::sync::broadcast;

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct ServiceContext {
    store: SharedStore,
    config: Arc<AppConfig>,
    events: BroadcastSink,
}

impl ServiceContext {
    /// Create a context around a fresh store wired to a new broadcast sink
    pub fn new(config: AppConfig) -> Self {
        let events = BroadcastSink::new(config.events.broadcast_buffer);
        let store = MessageStore::new().with_sink(Arc::new(events.clone()));
        Self {
            store: shared(store),
            config: Arc::new(config),
            events,
        }
    }

    /// Create a new service context builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Store ===

    /// Shared handle to the message store
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Lock the store for one operation
    pub fn lock(&self) -> MutexGuard<'_, MessageStore> {
        self.store.lock()
    }

    // === Config ===

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Grouping rule from the presentation config
    pub fn grouping(&self) -> Grouping {
        Grouping::new(self.config.presentation.grouping_window())
    }

    // === Events ===

    pub fn events(&self) -> &BroadcastSink {
        &self.events
    }

    /// Receive every store event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"SharedStore")
            .field("config", &self.config)
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    config: Option<AppConfig>,
    store: Option<MessageStore>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Start from an existing store (for example one pre-filled with history)
    pub fn store(mut self, store: MessageStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::App` if the config does not validate
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        let config = self.config.unwrap_or_default();
        config.validate().map_err(chat_common::AppError::from)?;

        let events = BroadcastSink::new(config.events.broadcast_buffer);
        let mut store = self.store.unwrap_or_default();
        store.add_sink(Arc::new(events.clone()));

        Ok(ServiceContext {
            store: shared(store),
            config: Arc::new(config),
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{ChannelId, NewMessage};

    #[test]
    fn test_builder_defaults() {
        let ctx = ServiceContext::builder().build().unwrap();
        assert_eq!(ctx.config().store.max_content_length, 4000);
        assert_eq!(ctx.grouping(), Grouping::default());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.store.max_content_length = 0;
        let err = ServiceContext::builder().config(config).build().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_clones_share_store() {
        let ctx = ServiceContext::new(AppConfig::default());
        let other = ctx.clone();
        let general = ChannelId::new("general");

        ctx.lock()
            .post_message(&general, NewMessage::new("u1", "Alice", "hi"));
        assert_eq!(other.lock().message_count(&general), 1);
    }

    #[tokio::test]
    async fn test_prefilled_store_publishes_to_subscribers() {
        let ctx = ServiceContext::builder()
            .store(MessageStore::new())
            .build()
            .unwrap();
        let mut rx = ctx.subscribe();

        ctx.lock().post_message(
            &ChannelId::new("general"),
            NewMessage::new("u1", "Alice", "hi"),
        );
        assert_eq!(rx.recv().await.unwrap().event_type(), "MESSAGE_CREATED");
    }
}
