//! Reaction service
//!
//! Handles message reactions (add, remove, toggle) on root messages and
//! replies.

use chat_core::{ChannelId, DomainError, MessageId, Post, ReactionCount, UserId};
use chat_presentation::reaction_chips;
use chat_store::MessageStore;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ReactionRequest, ReactionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReactionOp {
    Add,
    Remove,
    Toggle,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add reaction to a message or reply
    #[instrument(skip(self, request), fields(emoji = %request.emoji))]
    pub fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        request: ReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        self.apply(channel_id, message_id, &request, ReactionOp::Add)
    }

    /// Remove reaction from a message or reply
    #[instrument(skip(self, request), fields(emoji = %request.emoji))]
    pub fn remove_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        request: ReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        self.apply(channel_id, message_id, &request, ReactionOp::Remove)
    }

    /// Remove the reaction if the user already has it, otherwise add it
    #[instrument(skip(self, request), fields(emoji = %request.emoji))]
    pub fn toggle_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        request: ReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        self.apply(channel_id, message_id, &request, ReactionOp::Toggle)
    }

    fn apply(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        request: &ReactionRequest,
        op: ReactionOp,
    ) -> ServiceResult<ReactionResponse> {
        request.validate().map_err(|errors| {
            if errors.field_errors().contains_key("emoji") {
                ServiceError::from(DomainError::InvalidEmoji(request.emoji.clone()))
            } else {
                ServiceError::from(errors)
            }
        })?;
        let user_id = UserId::new(request.user_id.as_str());
        let emoji = request.emoji.as_str();

        let mut store = self.ctx.lock();
        if chips(&store, channel_id, message_id, &user_id).is_none() {
            return Err(DomainError::MessageNotFound(message_id.clone()).into());
        }

        let add = match op {
            ReactionOp::Add => true,
            ReactionOp::Remove => false,
            ReactionOp::Toggle => !store.has_reacted(channel_id, message_id, emoji, &user_id),
        };
        let changed = if add {
            store.add_reaction(channel_id, message_id, emoji, &user_id)
        } else {
            store.remove_reaction(channel_id, message_id, emoji, &user_id)
        };

        if changed {
            info!(
                message_id = %message_id,
                user_id = %user_id,
                added = add,
                "Reaction updated"
            );
        }

        Ok(ReactionResponse {
            message_id: message_id.to_string(),
            emoji: emoji.to_string(),
            changed,
            reacted: store.has_reacted(channel_id, message_id, emoji, &user_id),
            reactions: chips(&store, channel_id, message_id, &user_id).unwrap_or_default(),
        })
    }
}

/// Reaction chips of a root message or reply; `None` if neither exists
fn chips(
    store: &MessageStore,
    channel_id: &ChannelId,
    message_id: &MessageId,
    viewer: &UserId,
) -> Option<Vec<ReactionCount>> {
    if let Some(message) = store.find_message(channel_id, message_id) {
        return Some(reaction_chips(message.reactions(), Some(viewer)));
    }
    store
        .find_reply(channel_id, message_id)
        .map(|reply| reaction_chips(reply.reactions(), Some(viewer)))
}
