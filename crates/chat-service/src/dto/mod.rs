//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for composed input
//! - Response DTOs for serializing store state
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{AttachmentRequest, ReactionRequest, SendMessageRequest};

pub use responses::{
    AttachmentResponse, ChannelSummaryResponse, MessageListItem, MessageResponse,
    ReactionResponse, ReplyResponse, ThreadResponse,
};

pub use mappers::{MessageWithViewer, ReplyWithViewer};
