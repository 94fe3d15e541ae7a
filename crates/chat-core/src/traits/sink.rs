//! Event sink trait (port) - where the store sends its change events
//!
//! The domain layer defines what it emits; the backend adapter and view layers
//! provide implementations.

use crate::events::DomainEvent;

/// Receives every state change applied to the message store
///
/// Implementations must not block: the store publishes synchronously from
/// inside its mutation calls.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &DomainEvent);
}
