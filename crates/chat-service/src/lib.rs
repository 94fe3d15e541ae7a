//! # chat-service
//!
//! Application layer: validation of composed input, reaction toggling,
//! thread open/close and unread markers on top of the message store.

pub mod dto;
pub mod services;

pub use services::{
    ChannelService, MessageService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ThreadService,
};
