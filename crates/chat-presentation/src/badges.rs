//! Badges and small labels shown around messages

use chat_core::{Message, Reactions, ReactionCount, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timestamp::relative_time;

/// Emojis offered by the quick-reaction picker
pub const QUICK_REACTIONS: [&str; 8] = ["👍", "❤️", "😂", "😮", "😢", "😡", "🎉", "👏"];

const UNREAD_BADGE_CAP: usize = 99;

/// Sidebar unread badge text; nothing for a fully read channel
pub fn unread_badge(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        n if n > UNREAD_BADGE_CAP => Some(format!("{UNREAD_BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}

/// `1 reply` / `N replies`; nothing when there is no thread
pub fn reply_label(reply_count: usize) -> Option<String> {
    match reply_count {
        0 => None,
        1 => Some("1 reply".to_string()),
        n => Some(format!("{n} replies")),
    }
}

/// Uppercased first letter of a display name, for the avatar tile
pub fn avatar_initial(name: &str) -> Option<String> {
    name.trim().chars().next().map(|c| c.to_uppercase().collect())
}

/// Reaction chips with `me` set for the viewer's own reactions
pub fn reaction_chips(reactions: &Reactions, viewer: Option<&UserId>) -> Vec<ReactionCount> {
    reactions.counts_for(viewer)
}

/// Thread preview under a root message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadSummary {
    pub label: String,
    /// Relative age of the latest reply
    pub last_reply: String,
    pub participant_count: usize,
}

/// Summarize a message's thread as seen at `now`; `None` without replies
pub fn thread_summary(message: &Message, now: &DateTime<Utc>) -> Option<ThreadSummary> {
    let label = reply_label(message.reply_count())?;
    Some(ThreadSummary {
        label,
        last_reply: relative_time(&message.last_activity_at(), now),
        participant_count: message.thread_participants().len(),
    })
}
