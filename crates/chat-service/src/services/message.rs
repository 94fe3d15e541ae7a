//! Message service
//!
//! Handles composing messages and replies, listing a channel, and merging
//! messages that arrive from the backend.

use chat_core::{AttachmentRef, ChannelId, DomainError, Message, MessageId, NewMessage, Reply, UserId};
use chat_presentation::prepare_submission;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{
    AttachmentRequest, MessageListItem, MessageResponse, MessageWithViewer, ReplyResponse,
    ReplyWithViewer, SendMessageRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new root message.
    ///
    /// Whitespace-only input is silently dropped (`Ok(None)`). Posting marks
    /// the channel read for the poster.
    #[instrument(skip(self, request), fields(channel_id = %channel_id))]
    pub fn send_message(
        &self,
        channel_id: &ChannelId,
        request: SendMessageRequest,
    ) -> ServiceResult<Option<MessageResponse>> {
        let Some(input) = self.prepare(&request)? else {
            debug!("Empty message, nothing to send");
            return Ok(None);
        };
        let author_id = input.author_id.clone();

        let mut store = self.ctx.lock();
        let message_id = store.post_message(channel_id, input);
        store.mark_channel_read(channel_id);

        let message = store
            .find_message(channel_id, &message_id)
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;

        info!(message_id = %message_id, "Message sent");
        Ok(Some(MessageResponse::from(MessageWithViewer::new(
            message,
            Some(&author_id),
        ))))
    }

    /// Post a reply in the thread of `parent_id`.
    ///
    /// Whitespace-only input is silently dropped (`Ok(None)`); an unknown
    /// parent is an error.
    #[instrument(skip(self, request), fields(channel_id = %channel_id, parent_id = %parent_id))]
    pub fn send_reply(
        &self,
        channel_id: &ChannelId,
        parent_id: &MessageId,
        request: SendMessageRequest,
    ) -> ServiceResult<Option<ReplyResponse>> {
        let Some(input) = self.prepare(&request)? else {
            debug!("Empty reply, nothing to send");
            return Ok(None);
        };
        let author_id = input.author_id.clone();

        let mut store = self.ctx.lock();
        let reply_id = store
            .post_reply(channel_id, parent_id, input)
            .ok_or_else(|| DomainError::MessageNotFound(parent_id.clone()))?;

        let reply = store
            .find_reply(channel_id, &reply_id)
            .ok_or_else(|| DomainError::MessageNotFound(reply_id.clone()))?;

        info!(reply_id = %reply_id, "Reply sent");
        Ok(Some(ReplyResponse::from(ReplyWithViewer::new(
            reply,
            Some(&author_id),
        ))))
    }

    /// Messages of a channel in order, each flagged with whether it opens a
    /// new author header
    pub fn list_messages(&self, channel_id: &ChannelId, viewer: Option<&UserId>) -> Vec<MessageListItem> {
        let grouping = self.ctx.grouping();
        let store = self.ctx.lock();

        grouping
            .group(store.messages(channel_id))
            .into_iter()
            .map(|item| MessageListItem {
                message: MessageResponse::from(MessageWithViewer::new(item.post, viewer)),
                show_header: item.show_header,
            })
            .collect()
    }

    /// Get a single root message
    pub fn get_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<MessageResponse> {
        let store = self.ctx.lock();
        let message = store
            .find_message(channel_id, message_id)
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;
        Ok(MessageResponse::from(MessageWithViewer::new(message, viewer)))
    }

    /// Merge a message pushed by the backend. Returns `false` for an echo of
    /// a message already in the channel.
    #[instrument(skip(self, message), fields(channel_id = %channel_id, message_id = %message.id))]
    pub fn receive_remote(&self, channel_id: &ChannelId, message: Message) -> bool {
        let merged = self.ctx.lock().merge_remote_message(channel_id, message);
        if merged {
            info!("Remote message received");
        }
        merged
    }

    /// Merge a reply pushed by the backend
    #[instrument(skip(self, reply), fields(channel_id = %channel_id, parent_id = %parent_id))]
    pub fn receive_remote_reply(&self, channel_id: &ChannelId, parent_id: &MessageId, reply: Reply) -> bool {
        let merged = self.ctx.lock().merge_remote_reply(channel_id, parent_id, reply);
        if merged {
            info!("Remote reply received");
        }
        merged
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Validate a request and turn it into store input; `None` if there is
    /// nothing to send
    fn prepare(&self, request: &SendMessageRequest) -> ServiceResult<Option<NewMessage>> {
        request.validate()?;

        let Some(content) = prepare_submission(&request.content) else {
            return Ok(None);
        };
        let max = self.ctx.config().store.max_content_length;
        if content.chars().count() > max {
            return Err(DomainError::ContentTooLong { max }.into());
        }

        let attachments = request.attachments.iter().map(attachment_ref).collect();
        Ok(Some(
            NewMessage::new(
                UserId::new(request.author_id.as_str()),
                request.author_name.as_str(),
                content,
            )
            .with_attachments(attachments),
        ))
    }
}

fn attachment_ref(request: &AttachmentRequest) -> AttachmentRef {
    let mut attachment = AttachmentRef::new(request.filename.as_str(), request.url.as_str());
    attachment.content_type.clone_from(&request.content_type);
    attachment
}
