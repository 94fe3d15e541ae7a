//! Event sinks
//!
//! Ready-made [`EventSink`](chat_core::EventSink) implementations for
//! fanning store changes out to async subscribers or collecting them.

mod broadcast;
mod event_log;

pub use broadcast::BroadcastSink;
pub use event_log::EventLog;
