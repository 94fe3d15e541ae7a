//! Message content formatting
//!
//! Content is plain text with a few lightweight markers:
//!
//! | Syntax     | Segment                 |
//! |------------|-------------------------|
//! | `@name`    | [`Segment::Mention`]    |
//! | `#name`    | [`Segment::Channel`]    |
//! | `*text*`   | [`Segment::Bold`]       |
//! | `_text_`   | [`Segment::Italic`]     |
//! | `` `x` ``  | [`Segment::Code`]       |
//!
//! Markers do not nest; the inside of a styled span is taken literally.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(?P<mention>\w+)|#(?P<channel>\w+)|\*(?P<bold>[^*]+)\*|_(?P<italic>[^_]+)_|`(?P<code>[^`]+)`")
        .expect("markup regex pattern is valid")
});

/// A run of message content with one style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Username without the `@`
    Mention(&'a str),
    /// Channel name without the `#`
    Channel(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    Code(&'a str),
}

/// Split message content into styled segments, in order
pub fn parse_content(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in MARKUP_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text(&content[last..whole.start()]));
        }

        let segment = if let Some(m) = caps.name("mention") {
            Segment::Mention(m.as_str())
        } else if let Some(m) = caps.name("channel") {
            Segment::Channel(m.as_str())
        } else if let Some(m) = caps.name("bold") {
            Segment::Bold(m.as_str())
        } else if let Some(m) = caps.name("italic") {
            Segment::Italic(m.as_str())
        } else if let Some(m) = caps.name("code") {
            Segment::Code(m.as_str())
        } else {
            Segment::Text(whole.as_str())
        };
        segments.push(segment);
        last = whole.end();
    }

    if last < content.len() {
        segments.push(Segment::Text(&content[last..]));
    }
    segments
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render segments to an HTML fragment
pub fn render_html(segments: &[Segment<'_>]) -> String {
    let mut html = String::new();
    for segment in segments {
        // Writing to a String cannot fail
        let _ = match segment {
            Segment::Text(text) => write!(html, "{}", escape_html(text)),
            Segment::Mention(name) => {
                write!(html, r#"<span class="mention">@{}</span>"#, escape_html(name))
            }
            Segment::Channel(name) => {
                write!(html, r#"<span class="channel-ref">#{}</span>"#, escape_html(name))
            }
            Segment::Bold(text) => write!(html, "<strong>{}</strong>", escape_html(text)),
            Segment::Italic(text) => write!(html, "<em>{}</em>", escape_html(text)),
            Segment::Code(text) => write!(html, "<code>{}</code>", escape_html(text)),
        };
    }
    html
}

/// Usernames mentioned in the content, first occurrence order, no repeats
pub fn mentioned_usernames(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse_content(content) {
        if let Segment::Mention(name) = segment {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_content("hello there"), [Segment::Text("hello there")]);
        assert!(parse_content("").is_empty());
    }

    #[test]
    fn test_mentions_and_channels() {
        assert_eq!(
            parse_content("hey @alice, see #general"),
            [
                Segment::Text("hey "),
                Segment::Mention("alice"),
                Segment::Text(", see "),
                Segment::Channel("general"),
            ]
        );
    }

    #[test]
    fn test_styles() {
        assert_eq!(
            parse_content("*bold* _it_ `x + 1`"),
            [
                Segment::Bold("bold"),
                Segment::Text(" "),
                Segment::Italic("it"),
                Segment::Text(" "),
                Segment::Code("x + 1"),
            ]
        );
    }

    #[test]
    fn test_unclosed_marker_is_text() {
        assert_eq!(parse_content("2 * 3"), [Segment::Text("2 * 3")]);
        assert_eq!(parse_content("lone @"), [Segment::Text("lone @")]);
    }

    #[test]
    fn test_underscore_belongs_to_mention() {
        assert_eq!(
            parse_content("@john_doe"),
            [Segment::Mention("john_doe")]
        );
    }

    #[test]
    fn test_render_escapes() {
        let html = render_html(&parse_content("<b>@bob</b> *a&b*"));
        assert_eq!(
            html,
            r#"&lt;b&gt;<span class="mention">@bob</span>&lt;/b&gt; <strong>a&amp;b</strong>"#
        );
    }

    #[test]
    fn test_mentioned_usernames_dedup() {
        assert_eq!(
            mentioned_usernames("@bob ping @carol and @bob again"),
            ["bob", "carol"]
        );
        assert!(mentioned_usernames("no mentions").is_empty());
    }
}
