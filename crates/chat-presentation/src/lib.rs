//! # chat-presentation
//!
//! Stateless display rules derived from store data: which messages start a
//! new header group, relative and clock timestamps, content segmentation and
//! HTML rendering, composer helpers and the small badges shown around a
//! message.

pub mod badges;
pub mod compose;
pub mod formatting;
pub mod grouping;
pub mod timestamp;

pub use badges::{
    avatar_initial, reaction_chips, reply_label, thread_summary, unread_badge, ThreadSummary,
    QUICK_REACTIONS,
};
pub use compose::{
    filter_members, insert_mention, mention_query, prepare_submission, wrap_selection,
    FormatStyle, Member,
};
pub use formatting::{escape_html, mentioned_usernames, parse_content, render_html, Segment};
pub use grouping::{DisplayItem, Grouping, DEFAULT_GROUPING_WINDOW};
pub use timestamp::{clock_time, relative_time};
