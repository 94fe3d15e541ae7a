//! Message grouping
//!
//! Consecutive messages from the same author collapse under one header
//! (avatar, name, time) as long as each follows the previous one within the
//! grouping window.

use std::time::Duration;

use chat_core::Post;

/// Default grouping window (5 minutes)
pub const DEFAULT_GROUPING_WINDOW: Duration = Duration::from_secs(300);

/// A post paired with whether it opens a new header group
#[derive(Debug, Clone, Copy)]
pub struct DisplayItem<'a, P> {
    pub post: &'a P,
    pub show_header: bool,
}

/// Grouping rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grouping {
    window: Option<Duration>,
}

impl Default for Grouping {
    fn default() -> Self {
        Self::new(Some(DEFAULT_GROUPING_WINDOW))
    }
}

impl Grouping {
    /// `None` groups any run of same-author messages regardless of spacing
    pub fn new(window: Option<Duration>) -> Self {
        Self { window }
    }

    #[inline]
    pub fn window(&self) -> Option<Duration> {
        self.window
    }

    /// Check whether `current` needs its own header after `previous`
    pub fn starts_group<P: Post>(&self, previous: Option<&P>, current: &P) -> bool {
        let Some(previous) = previous else {
            return true;
        };
        if previous.author_id() != current.author_id() {
            return true;
        }
        let Some(window) = self.window else {
            return false;
        };

        let gap_ms = current.created_at().timestamp_millis() - previous.created_at().timestamp_millis();
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        !(0..=window_ms).contains(&gap_ms)
    }

    /// Annotate a whole list in display order
    pub fn group<'a, P: Post>(&self, posts: &'a [P]) -> Vec<DisplayItem<'a, P>> {
        let mut previous = None;
        posts
            .iter()
            .map(|post| {
                let show_header = self.starts_group(previous, post);
                previous = Some(post);
                DisplayItem { post, show_header }
            })
            .collect()
    }
}
