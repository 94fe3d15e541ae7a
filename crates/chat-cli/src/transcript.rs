//! Plain-text transcript rendering

use std::fmt::Write as _;

use chat_core::ReactionCount;
use chat_presentation::{avatar_initial, clock_time, relative_time, reply_label};
use chat_service::dto::{ChannelSummaryResponse, MessageListItem, ReplyResponse, ThreadResponse};
use chrono::{DateTime, Utc};

fn reaction_line(reactions: &[ReactionCount]) -> Option<String> {
    if reactions.is_empty() {
        return None;
    }
    let chips: Vec<String> = reactions
        .iter()
        .map(|chip| {
            let mine = if chip.me { "*" } else { "" };
            format!("[{} {}{mine}]", chip.emoji, chip.count)
        })
        .collect();
    Some(chips.join(" "))
}

/// Render a channel listing as seen at `now`
pub fn render_channel(channel: &str, items: &[MessageListItem], now: &DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== #{channel} ({} messages) ==", items.len());

    for item in items {
        let message = &item.message;
        if item.show_header {
            let initial = avatar_initial(&message.author_name).unwrap_or_default();
            let _ = writeln!(
                out,
                "[{initial}] {}  {}",
                message.author_name,
                clock_time(&message.timestamp)
            );
        }
        let _ = writeln!(out, "    {}", message.content);
        if let Some(line) = reaction_line(&message.reactions) {
            let _ = writeln!(out, "    {line}");
        }
        if let Some(label) = reply_label(message.reply_count) {
            let _ = writeln!(
                out,
                "    > {label}, last reply {}",
                relative_time(&message.last_activity, now)
            );
        }
    }
    out
}

fn render_reply(out: &mut String, reply: &ReplyResponse, now: &DateTime<Utc>) {
    let _ = writeln!(
        out,
        "  {} ({}): {}",
        reply.author_name,
        relative_time(&reply.timestamp, now),
        reply.content
    );
    if let Some(line) = reaction_line(&reply.reactions) {
        let _ = writeln!(out, "    {line}");
    }
}

/// Render the open thread panel
pub fn render_thread(thread: &ThreadResponse, now: &DateTime<Utc>) -> String {
    let mut out = String::new();
    let root = &thread.root;
    let _ = writeln!(out, "-- thread in #{} --", root.channel_id);
    let _ = writeln!(out, "{}: {}", root.author_name, root.content);
    for reply in &thread.replies {
        render_reply(&mut out, reply, now);
    }
    out
}

/// Render the channel sidebar
pub fn render_channels(channels: &[ChannelSummaryResponse]) -> String {
    let mut out = String::new();
    for channel in channels {
        let sigil = if channel.is_direct_message { "@" } else { "#" };
        match &channel.badge {
            Some(badge) => {
                let _ = writeln!(out, "{sigil}{} ({badge})", channel.channel_id);
            }
            None => {
                let _ = writeln!(out, "{sigil}{}", channel.channel_id);
            }
        }
    }
    out
}
