//! In-memory event log

use chat_core::{DomainEvent, EventSink};
use parking_lot::Mutex;

/// Sink that keeps every published event in order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<DomainEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything logged so far
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Type tags of the logged events, oldest first
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(DomainEvent::event_type).collect()
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: &DomainEvent) {
        self.events.lock().push(event.clone());
    }
}
