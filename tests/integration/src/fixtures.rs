//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chat_core::UserId;
use chat_presentation::Member;
use chat_service::dto::{ReactionRequest, SendMessageRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A workspace user as seen in tests
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub name: String,
}

impl TestUser {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: UserId::new(id),
            name: name.to_string(),
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self::new(&format!("user{suffix}"), &format!("User {suffix}"))
    }

    pub fn alice() -> Self {
        Self::new("u1", "Alice")
    }

    pub fn bob() -> Self {
        Self::new("u2", "Bob")
    }

    pub fn carol() -> Self {
        Self::new("u3", "Carol")
    }

    /// Request for composing `content` as this user
    pub fn says(&self, content: &str) -> SendMessageRequest {
        SendMessageRequest::new(self.id.as_str(), self.name.as_str(), content)
    }

    /// Request for reacting with `emoji` as this user
    pub fn reacts(&self, emoji: &str) -> ReactionRequest {
        ReactionRequest::new(self.id.as_str(), emoji)
    }

    pub fn member(&self) -> Member {
        Member::new(self.id.clone(), self.name.to_lowercase(), self.name.as_str())
    }
}

/// Members offered by the mention picker
pub fn sample_members() -> Vec<Member> {
    vec![
        TestUser::alice().member(),
        TestUser::bob().member(),
        TestUser::carol().member(),
        Member::new("u4", "dana", "Dana Scully"),
    ]
}
