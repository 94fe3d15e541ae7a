//! Composer helpers
//!
//! Pure text transformations behind the message input box: submission
//! trimming, the `@` mention picker and the formatting buttons.

use std::ops::Range;

use chat_core::UserId;
use serde::{Deserialize, Serialize};

/// Trim composed input; `None` means there is nothing to send
pub fn prepare_submission(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Text typed after the last `@`, if the cursor is still inside that mention
/// (no whitespace after the `@`)
pub fn mention_query(text: &str) -> Option<&str> {
    let at = text.rfind('@')?;
    match text.rfind(char::is_whitespace) {
        Some(space) if space > at => None,
        _ => Some(&text[at + 1..]),
    }
}

/// Replace the mention being typed with `@username ` and return the new text
pub fn insert_mention(text: &str, username: &str) -> String {
    let before = text.rfind('@').map_or(text, |at| &text[..at]);
    format!("{before}@{username} ")
}

/// Formatting button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    Bold,
    Italic,
    Code,
}

impl FormatStyle {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Bold => "*",
            Self::Italic => "_",
            Self::Code => "`",
        }
    }
}

/// Wrap the byte range `selection` in the style's markers.
///
/// Returns `None` if the range is out of bounds or splits a character.
pub fn wrap_selection(text: &str, selection: Range<usize>, style: FormatStyle) -> Option<String> {
    let selected = text.get(selection.clone())?;
    let marker = style.marker();
    Some(format!(
        "{}{marker}{selected}{marker}{}",
        &text[..selection.start],
        &text[selection.end..]
    ))
}

/// A workspace member offered in the mention picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
}

impl Member {
    pub fn new(
        user_id: impl Into<UserId>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.username.to_lowercase().contains(query_lower)
            || self.display_name.to_lowercase().contains(query_lower)
    }
}

/// Members whose username or display name contains `query`, ignoring case
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let query = query.to_lowercase();
    members.iter().filter(|m| m.matches(&query)).collect()
}
