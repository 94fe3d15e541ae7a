//! Business logic services
//!
//! This module contains the service layer that validates composed input,
//! drives the message store and maps results to response DTOs.

pub mod channel;
pub mod context;
pub mod error;
pub mod message;
pub mod reaction;
pub mod thread;

// Re-export all services for convenience
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use reaction::ReactionService;
pub use thread::ThreadService;
