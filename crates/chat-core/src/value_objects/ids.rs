//! Identifiers - string-keyed ids for channels, users and messages
//!
//! Channels are keyed by their name (`general`, `dm-3`), users by whatever the
//! auth service hands out, and messages by a generated
//! `<kind>-<unix millis>-<random>` string.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Error when parsing an identifier from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier must not contain whitespace")]
    Whitespace,
}

fn check_id(s: &str) -> Result<(), IdParseError> {
    if s.is_empty() {
        return Err(IdParseError::Empty);
    }
    if s.chars().any(char::is_whitespace) {
        return Err(IdParseError::Whitespace);
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id without validation
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse a non-empty, whitespace-free id
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                check_id(s)?;
                Ok(Self(s.to_owned()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Channel key (`general`, `random`, `dm-1`)
    ChannelId
);

string_id!(
    /// User identifier issued by the auth service
    UserId
);

string_id!(
    /// Message or reply identifier
    MessageId
);

impl ChannelId {
    /// Direct-message channels are keyed with a `dm-` prefix
    #[inline]
    pub fn is_direct_message(&self) -> bool {
        self.0.starts_with("dm-")
    }
}

/// What kind of message an id is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Root,
    Reply,
}

impl MessageKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Root => "msg",
            Self::Reply => "reply",
        }
    }
}

/// Generates message ids from the wall clock plus 64 random bits
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageIdGenerator;

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new id for a message of the given kind
    pub fn generate(&self, kind: MessageKind) -> MessageId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let random: u64 = rand::thread_rng().gen();
        MessageId(format!("{}-{millis}-{random:016x}", kind.prefix()))
    }

    /// Extract the millisecond timestamp embedded in a generated id
    pub fn timestamp_of(id: &MessageId) -> Option<i64> {
        id.as_str().split('-').nth(1)?.parse().ok()
    }
}
