//! Message store and read markers

mod message_store;
mod read_markers;

pub use message_store::MessageStore;
pub use read_markers::ReadMarkers;
