//! Ports implemented outside the domain layer

mod sink;

pub use sink::EventSink;
