//! Message entity - root messages, thread replies and attachment references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::reaction::Reactions;
use crate::value_objects::{ChannelId, MessageId, UserId};

/// Reference to an uploaded file; the bytes live with the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl AttachmentRef {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            content_type: None,
        }
    }

    /// Check if attachment is an image
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.starts_with("image/"))
    }
}

/// Composed input for a new message or reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
}

impl NewMessage {
    pub fn new(
        author_id: impl Into<UserId>,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            author_name: author_name.into(),
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Fields shared by root messages and replies
pub trait Post {
    fn id(&self) -> &MessageId;
    fn author_id(&self) -> &UserId;
    fn author_name(&self) -> &str;
    fn content(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn edited_at(&self) -> Option<DateTime<Utc>>;
    fn reactions(&self) -> &Reactions;

    #[inline]
    fn is_edited(&self) -> bool {
        self.edited_at().is_some()
    }
}

/// A reply inside a thread. Replies never carry replies of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub parent_id: MessageId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    reactions: Reactions,
}

impl Reply {
    pub fn new(
        id: MessageId,
        channel_id: ChannelId,
        parent_id: MessageId,
        input: NewMessage,
    ) -> Self {
        Self {
            id,
            channel_id,
            parent_id,
            author_id: input.author_id,
            author_name: input.author_name,
            content: input.content,
            created_at: Utc::now(),
            edited_at: None,
            attachments: input.attachments,
            reactions: Reactions::new(),
        }
    }

    pub fn add_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        self.reactions.add(emoji, user_id)
    }

    pub fn remove_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        self.reactions.remove(emoji, user_id)
    }
}

/// A root message in a channel, with its thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    reactions: Reactions,
    #[serde(default)]
    replies: Vec<Reply>,
}

impl Message {
    /// Create a new message with no reactions and an empty thread
    pub fn new(id: MessageId, channel_id: ChannelId, input: NewMessage) -> Self {
        Self {
            id,
            channel_id,
            author_id: input.author_id,
            author_name: input.author_name,
            content: input.content,
            created_at: Utc::now(),
            edited_at: None,
            attachments: input.attachments,
            reactions: Reactions::new(),
            replies: Vec::new(),
        }
    }

    #[inline]
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    #[inline]
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Users who replied in the thread. The root author is only included
    /// if they replied too.
    pub fn thread_participants(&self) -> HashSet<&UserId> {
        self.replies.iter().map(|r| &r.author_id).collect()
    }

    /// Timestamp of the latest reply, or of the message itself if the
    /// thread is empty
    pub fn last_activity_at(&self) -> DateTime<Utc> {
        self.replies
            .last()
            .map_or(self.created_at, |r| r.created_at)
    }

    /// Append a reply to the thread.
    ///
    /// Returns `false` (and leaves the thread untouched) if the reply belongs
    /// to another parent or is already in the thread.
    pub fn push_reply(&mut self, reply: Reply) -> bool {
        if reply.parent_id != self.id || self.replies.iter().any(|r| r.id == reply.id) {
            return false;
        }
        self.replies.push(reply);
        true
    }

    /// Move the message into `channel_id` and re-key its thread.
    ///
    /// Every reply is re-parented to this message and channel; replies whose
    /// id is already in the thread, or for which `skip` returns true, are
    /// dropped. Returns the number of dropped replies.
    pub fn rehome(&mut self, channel_id: &ChannelId, skip: impl Fn(&MessageId) -> bool) -> usize {
        self.channel_id = channel_id.clone();
        let incoming = std::mem::take(&mut self.replies);
        let total = incoming.len();
        for mut reply in incoming {
            if skip(&reply.id) {
                continue;
            }
            reply.parent_id = self.id.clone();
            reply.channel_id = channel_id.clone();
            self.push_reply(reply);
        }
        total - self.replies.len()
    }

    pub fn find_reply(&self, reply_id: &MessageId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == reply_id)
    }

    pub fn find_reply_mut(&mut self, reply_id: &MessageId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| &r.id == reply_id)
    }

    pub fn add_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        self.reactions.add(emoji, user_id)
    }

    pub fn remove_reaction(&mut self, emoji: &str, user_id: &UserId) -> bool {
        self.reactions.remove(emoji, user_id)
    }
}

macro_rules! impl_post {
    ($ty:ty) => {
        impl Post for $ty {
            fn id(&self) -> &MessageId {
                &self.id
            }
            fn author_id(&self) -> &UserId {
                &self.author_id
            }
            fn author_name(&self) -> &str {
                &self.author_name
            }
            fn content(&self) -> &str {
                &self.content
            }
            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
            fn edited_at(&self) -> Option<DateTime<Utc>> {
                self.edited_at
            }
            fn reactions(&self) -> &Reactions {
                &self.reactions
            }
        }
    };
}

impl_post!(Message);
impl_post!(Reply);
