//! # chat-store
//!
//! In-memory message store: channel message sequences, threads, reactions,
//! the open thread and read markers.
//!
//! ## Example
//!
//! ```
//! use chat_core::{ChannelId, NewMessage, UserId};
//! use chat_store::MessageStore;
//!
//! let mut store = MessageStore::new();
//! let general = ChannelId::new("general");
//! let id = store.post_message(&general, NewMessage::new("u1", "Alice", "hello"));
//! store.add_reaction(&general, &id, "👍", &UserId::new("u2"));
//!
//! assert_eq!(store.messages(&general).len(), 1);
//! ```

pub mod sinks;
pub mod store;

pub use sinks::{BroadcastSink, EventLog};
pub use store::{MessageStore, ReadMarkers};

use parking_lot::Mutex;
use std::sync::Arc;

/// Store handle shared between services
pub type SharedStore = Arc<Mutex<MessageStore>>;

/// Wrap a store for sharing
pub fn shared(store: MessageStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}
