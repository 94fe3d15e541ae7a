//! Reaction entity - emoji annotations on a message, tracked per user

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::value_objects::UserId;

/// One emoji on a message and the users who reacted with it
///
/// The count is the size of the user set; a `Reaction` held by [`Reactions`]
/// never has an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    users: HashSet<UserId>,
}

impl Reaction {
    fn with_user(emoji: String, user_id: UserId) -> Self {
        let mut users = HashSet::with_capacity(1);
        users.insert(user_id);
        Self { emoji, users }
    }

    /// Number of users who reacted with this emoji
    #[inline]
    pub fn count(&self) -> usize {
        self.users.len()
    }

    #[inline]
    pub fn users(&self) -> &HashSet<UserId> {
        &self.users
    }

    #[inline]
    pub fn has_user(&self, user_id: &UserId) -> bool {
        self.users.contains(user_id)
    }

    /// Check if reaction uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}

/// Aggregated reaction count for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionCount {
    pub emoji: String,
    pub count: usize,
    pub me: bool,
}

impl ReactionCount {
    pub fn new(emoji: String, count: usize, me: bool) -> Self {
        Self { emoji, count, me }
    }
}

/// Ordered reactions on a single message, first-added emoji first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Reaction>", into = "Vec<Reaction>")]
pub struct Reactions(Vec<Reaction>);

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `user_id` under `emoji`. Returns `false` if the user had already
    /// reacted with it.
    pub fn add(&mut self, emoji: &str, user_id: &UserId) -> bool {
        match self.0.iter_mut().find(|r| r.is_emoji(emoji)) {
            Some(reaction) => reaction.users.insert(user_id.clone()),
            None => {
                self.0
                    .push(Reaction::with_user(emoji.to_owned(), user_id.clone()));
                true
            }
        }
    }

    /// Remove `user_id` from `emoji`, dropping the reaction once nobody is
    /// left on it. Returns `false` if the user had not reacted.
    pub fn remove(&mut self, emoji: &str, user_id: &UserId) -> bool {
        let Some(pos) = self.0.iter().position(|r| r.is_emoji(emoji)) else {
            return false;
        };
        if !self.0[pos].users.remove(user_id) {
            return false;
        }
        if self.0[pos].users.is_empty() {
            self.0.remove(pos);
        }
        true
    }

    pub fn get(&self, emoji: &str) -> Option<&Reaction> {
        self.0.iter().find(|r| r.is_emoji(emoji))
    }

    /// Check whether `user_id` reacted with `emoji`
    pub fn has_reacted(&self, emoji: &str, user_id: &UserId) -> bool {
        self.get(emoji).is_some_and(|r| r.has_user(user_id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reaction> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-emoji counts as seen by `viewer`
    pub fn counts_for(&self, viewer: Option<&UserId>) -> Vec<ReactionCount> {
        self.0
            .iter()
            .map(|r| {
                let me = viewer.is_some_and(|v| r.has_user(v));
                ReactionCount::new(r.emoji.clone(), r.count(), me)
            })
            .collect()
    }
}

// Reactions arriving from outside the session are normalised: empty entries
// are dropped and duplicate emojis merged.
impl From<Vec<Reaction>> for Reactions {
    fn from(raw: Vec<Reaction>) -> Self {
        let mut reactions = Reactions::new();
        for reaction in raw {
            for user in &reaction.users {
                reactions.add(&reaction.emoji, user);
            }
        }
        reactions
    }
}

impl From<Reactions> for Vec<Reaction> {
    fn from(reactions: Reactions) -> Self {
        reactions.0
    }
}

impl<'a> IntoIterator for &'a Reactions {
    type Item = &'a Reaction;
    type IntoIter = std::slice::Iter<'a, Reaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
