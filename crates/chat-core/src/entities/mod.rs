//! Domain entities - core business objects

mod message;
mod reaction;
mod thread;

pub use message::{AttachmentRef, Message, NewMessage, Post, Reply};
pub use reaction::{Reaction, ReactionCount, Reactions};
pub use thread::ThreadSelection;
