//! Broadcast sink
//!
//! Fans store events out to any number of async receivers through a
//! `tokio::sync::broadcast` channel.

use chat_core::{DomainEvent, EventSink};
use tokio::sync::broadcast;

/// Default channel capacity
pub const DEFAULT_BROADCAST_BUFFER: usize = 256;

/// Event sink backed by a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<DomainEvent>,
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_BUFFER)
    }
}

impl BroadcastSink {
    /// Create a sink holding at most `capacity` unread events per receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Get a receiver for events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    #[inline]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, event: &DomainEvent) {
        // No receivers is not an error
        let _ = self.sender.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::events::ChannelReadEvent;
    use chat_core::ChannelId;

    fn read_event() -> DomainEvent {
        DomainEvent::ChannelRead(ChannelReadEvent::new(ChannelId::new("general")))
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let sink = BroadcastSink::new(8);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();
        assert_eq!(sink.receiver_count(), 2);

        sink.publish(&read_event());

        assert_eq!(first.recv().await.unwrap().event_type(), "CHANNEL_READ");
        assert_eq!(second.recv().await.unwrap().event_type(), "CHANNEL_READ");
    }

    #[test]
    fn test_publish_without_receivers() {
        let sink = BroadcastSink::default();
        sink.publish(&read_event());
        assert_eq!(sink.receiver_count(), 0);
    }
}
