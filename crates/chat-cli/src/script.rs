//! Replay script format
//!
//! One JSON object per line, tagged by `op`. Blank lines and lines starting
//! with `#` are skipped. Messages created by `post`/`reply` can be given a
//! label (`"as": "q1"`) and referred to by that label in later commands;
//! anything that is not a known label is used as a literal message id.

use std::collections::HashMap;

use chat_core::MessageId;
use chat_service::dto::AttachmentRequest;
use serde::Deserialize;

/// A single script command
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Post {
        channel: String,
        author_id: String,
        author_name: String,
        content: String,
        #[serde(default)]
        attachments: Vec<AttachmentRequest>,
        #[serde(default, rename = "as")]
        label: Option<String>,
    },
    Reply {
        channel: String,
        parent: String,
        author_id: String,
        author_name: String,
        content: String,
        #[serde(default, rename = "as")]
        label: Option<String>,
    },
    /// Message arriving from the backend
    Remote {
        channel: String,
        id: String,
        author_id: String,
        author_name: String,
        content: String,
    },
    React {
        channel: String,
        message: String,
        user_id: String,
        emoji: String,
    },
    Unreact {
        channel: String,
        message: String,
        user_id: String,
        emoji: String,
    },
    Toggle {
        channel: String,
        message: String,
        user_id: String,
        emoji: String,
    },
    OpenThread {
        channel: String,
        message: String,
        #[serde(default)]
        viewer: Option<String>,
    },
    CloseThread,
    MarkRead {
        channel: String,
    },
    Show {
        channel: String,
        #[serde(default)]
        viewer: Option<String>,
    },
    Channels,
}

impl Command {
    /// Short name for logs
    pub fn op(&self) -> &'static str {
        match self {
            Self::Post { .. } => "post",
            Self::Reply { .. } => "reply",
            Self::Remote { .. } => "remote",
            Self::React { .. } => "react",
            Self::Unreact { .. } => "unreact",
            Self::Toggle { .. } => "toggle",
            Self::OpenThread { .. } => "open_thread",
            Self::CloseThread => "close_thread",
            Self::MarkRead { .. } => "mark_read",
            Self::Show { .. } => "show",
            Self::Channels => "channels",
        }
    }
}

/// Parse one script line; `Ok(None)` for blank and comment lines
pub fn parse_line(line: &str) -> serde_json::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Labels given to created messages
#[derive(Debug, Default)]
pub struct Labels {
    ids: HashMap<String, MessageId>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: String, id: MessageId) {
        self.ids.insert(label, id);
    }

    /// Resolve a label, falling back to treating it as an id
    pub fn resolve(&self, reference: &str) -> MessageId {
        self.ids
            .get(reference)
            .cloned()
            .unwrap_or_else(|| MessageId::new(reference))
    }
}
