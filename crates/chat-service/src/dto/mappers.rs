//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Per-viewer fields (`me` on reaction chips) come from the `*WithViewer`
//! wrappers.

use chat_core::{AttachmentRef, Message, Post, Reply, UserId};
use chat_presentation::{mentioned_usernames, parse_content, reaction_chips, render_html};

use super::responses::{AttachmentResponse, MessageResponse, ReplyResponse};

// ============================================================================
// Attachment Mappers
// ============================================================================

impl From<&AttachmentRef> for AttachmentResponse {
    fn from(attachment: &AttachmentRef) -> Self {
        Self {
            filename: attachment.filename.clone(),
            url: attachment.url.clone(),
            content_type: attachment.content_type.clone(),
            is_image: attachment.is_image(),
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

/// Root message plus the user it is rendered for
#[derive(Debug, Clone, Copy)]
pub struct MessageWithViewer<'a> {
    pub message: &'a Message,
    pub viewer: Option<&'a UserId>,
}

impl<'a> MessageWithViewer<'a> {
    pub fn new(message: &'a Message, viewer: Option<&'a UserId>) -> Self {
        Self { message, viewer }
    }
}

impl From<MessageWithViewer<'_>> for MessageResponse {
    fn from(data: MessageWithViewer<'_>) -> Self {
        let message = data.message;
        let mut participants: Vec<String> = message
            .thread_participants()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        participants.sort();

        Self {
            id: message.id.to_string(),
            channel_id: message.channel_id.to_string(),
            author_id: message.author_id.to_string(),
            author_name: message.author_name.clone(),
            content: message.content.clone(),
            content_html: render_html(&parse_content(&message.content)),
            mentions: mentioned_usernames(&message.content),
            timestamp: message.created_at,
            edited_timestamp: message.edited_at,
            attachments: message.attachments.iter().map(AttachmentResponse::from).collect(),
            reactions: reaction_chips(message.reactions(), data.viewer),
            reply_count: message.reply_count(),
            thread_participants: participants,
            last_activity: message.last_activity_at(),
        }
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self::from(MessageWithViewer::new(message, None))
    }
}

// ============================================================================
// Reply Mappers
// ============================================================================

/// Reply plus the user it is rendered for
#[derive(Debug, Clone, Copy)]
pub struct ReplyWithViewer<'a> {
    pub reply: &'a Reply,
    pub viewer: Option<&'a UserId>,
}

impl<'a> ReplyWithViewer<'a> {
    pub fn new(reply: &'a Reply, viewer: Option<&'a UserId>) -> Self {
        Self { reply, viewer }
    }
}

impl From<ReplyWithViewer<'_>> for ReplyResponse {
    fn from(data: ReplyWithViewer<'_>) -> Self {
        let reply = data.reply;
        Self {
            id: reply.id.to_string(),
            parent_id: reply.parent_id.to_string(),
            channel_id: reply.channel_id.to_string(),
            author_id: reply.author_id.to_string(),
            author_name: reply.author_name.clone(),
            content: reply.content.clone(),
            content_html: render_html(&parse_content(&reply.content)),
            mentions: mentioned_usernames(&reply.content),
            timestamp: reply.created_at,
            edited_timestamp: reply.edited_at,
            attachments: reply.attachments.iter().map(AttachmentResponse::from).collect(),
            reactions: reaction_chips(reply.reactions(), data.viewer),
        }
    }
}

impl From<&Reply> for ReplyResponse {
    fn from(reply: &Reply) -> Self {
        Self::from(ReplyWithViewer::new(reply, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{ChannelId, MessageId, NewMessage};

    fn message() -> Message {
        Message::new(
            MessageId::new("msg-1"),
            ChannelId::new("general"),
            NewMessage::new("u1", "Alice", "hi @bob, *see* #random")
                .with_attachments(vec![AttachmentRef::new("cat.png", "https://x.test/cat.png")]),
        )
    }

    #[test]
    fn test_message_response_formats_content() {
        let response = MessageResponse::from(&message());
        assert_eq!(response.id, "msg-1");
        assert_eq!(response.mentions, ["bob"]);
        assert!(response.content_html.contains("<strong>see</strong>"));
        assert!(response.content_html.contains(r#"<span class="channel-ref">#random</span>"#));
        assert_eq!(response.attachments.len(), 1);
        assert_eq!(response.reply_count, 0);
    }

    #[test]
    fn test_viewer_flags_own_reactions() {
        let mut message = message();
        let viewer = UserId::new("u2");
        message.add_reaction("👍", &viewer);
        message.add_reaction("🎉", &UserId::new("u3"));

        let response = MessageResponse::from(MessageWithViewer::new(&message, Some(&viewer)));
        assert!(response.reactions[0].me);
        assert!(!response.reactions[1].me);

        let anonymous = MessageResponse::from(&message);
        assert!(anonymous.reactions.iter().all(|chip| !chip.me));
    }

    #[test]
    fn test_participants_sorted() {
        let mut message = message();
        for (id, author) in [("reply-1", "u9"), ("reply-2", "u3"), ("reply-3", "u9")] {
            message.push_reply(Reply::new(
                MessageId::new(id),
                ChannelId::new("general"),
                MessageId::new("msg-1"),
                NewMessage::new(author, author, "ok"),
            ));
        }
        let response = MessageResponse::from(&message);
        assert_eq!(response.reply_count, 3);
        assert_eq!(response.thread_participants, ["u3", "u9"]);
    }
}
