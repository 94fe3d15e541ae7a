//! Messaging Integration Tests
//!
//! Posting, replies, threads, remote merges and unread counts across the
//! store, presentation and service crates.
//!
//! Run with: cargo test -p integration-tests --test messaging_tests

use chat_core::{ChannelId, Message, MessageId, NewMessage, Reply};
use integration_tests::{general, TestApp, TestUser};

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_post_then_list() {
    let app = TestApp::new();
    let alice = TestUser::alice();

    let id = app.post(&general(), &alice, "hello");
    let listed = app.messages().list_messages(&general(), None);

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message.id, id.as_str());
    assert_eq!(listed[0].message.content, "hello");
    assert!(listed[0].message.reactions.is_empty());
    assert_eq!(listed[0].message.reply_count, 0);
    assert_eq!(app.take_event_types(), ["MESSAGE_CREATED", "CHANNEL_READ"]);
}

#[test]
fn test_channels_are_independent() {
    let app = TestApp::new();
    let alice = TestUser::alice();
    let random = ChannelId::new("random");

    app.post(&general(), &alice, "in general");
    app.post(&random, &alice, "in random");
    app.post(&random, &alice, "again");

    assert_eq!(app.messages().list_messages(&general(), None).len(), 1);
    assert_eq!(app.messages().list_messages(&random, None).len(), 2);
    assert!(app
        .messages()
        .list_messages(&ChannelId::new("empty"), None)
        .is_empty());
}

#[test]
fn test_message_ids_are_unique() {
    let app = TestApp::new();
    let alice = TestUser::alice();
    let ids: std::collections::HashSet<MessageId> = (0..200)
        .map(|i| app.post(&general(), &alice, &format!("message {i}")))
        .collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_blank_submission_changes_nothing() {
    let app = TestApp::new();
    let sent = app
        .messages()
        .send_message(&general(), TestUser::alice().says("   "))
        .unwrap();
    assert!(sent.is_none());
    assert!(app.take_event_types().is_empty());
}

// ============================================================================
// Thread Tests
// ============================================================================

#[test]
fn test_two_replies_by_same_user() {
    let app = TestApp::new();
    let alice = TestUser::alice();
    let carol = TestUser::carol();

    let root = app.post(&general(), &alice, "question");
    let first = app.reply(&general(), &root, &carol, "one");
    let second = app.reply(&general(), &root, &carol, "two");

    let thread = app.threads().open_thread(&general(), &root, None).unwrap();
    assert_eq!(thread.root.reply_count, 2);
    assert_eq!(thread.root.thread_participants, [carol.id.as_str()]);
    assert_eq!(thread.replies[0].id, first.as_str());
    assert_eq!(thread.replies[1].id, second.as_str());

    // Replies never show up at top level
    assert_eq!(app.messages().list_messages(&general(), None).len(), 1);
}

#[test]
fn test_thread_view_follows_new_replies() {
    let app = TestApp::new();
    let root = app.post(&general(), &TestUser::alice(), "question");
    app.threads().open_thread(&general(), &root, None).unwrap();

    app.reply(&general(), &root, &TestUser::bob(), "late answer");

    let current = app.threads().current_thread(None).unwrap();
    assert_eq!(current.replies.len(), 1);
    assert_eq!(current.replies[0].author_name, "Bob");
}

#[test]
fn test_selection_of_missing_message_renders_nothing() {
    let app = TestApp::new();
    app.ctx.lock().set_selected_thread(Some(chat_core::ThreadSelection::new(
        "general",
        "msg-does-not-exist",
    )));
    assert!(app.threads().selection().is_some());
    assert!(app.threads().current_thread(None).is_none());
}

// ============================================================================
// Remote Merge Tests
// ============================================================================

#[test]
fn test_remote_messages_interleave_in_arrival_order() {
    let app = TestApp::new();
    let local = app.post(&general(), &TestUser::alice(), "local");

    let remote = Message::new(
        MessageId::new("msg-remote-1"),
        general(),
        NewMessage::new("u9", "Zed", "remote"),
    );
    assert!(app.messages().receive_remote(&general(), remote.clone()));
    assert!(!app.messages().receive_remote(&general(), remote));

    let reply = Reply::new(
        MessageId::new("reply-remote-1"),
        general(),
        local.clone(),
        NewMessage::new("u9", "Zed", "remote reply"),
    );
    assert!(app.messages().receive_remote_reply(&general(), &local, reply));

    let listed = app.messages().list_messages(&general(), None);
    let ids: Vec<&str> = listed.iter().map(|item| item.message.id.as_str()).collect();
    assert_eq!(ids, [local.as_str(), "msg-remote-1"]);
    assert_eq!(listed[0].message.reply_count, 1);
}

#[test]
fn test_remote_messages_count_as_unread() {
    let app = TestApp::new();
    app.post(&general(), &TestUser::alice(), "mine");
    assert_eq!(app.channels().unread_count(&general()), 0);

    for i in 0..3 {
        app.messages().receive_remote(
            &general(),
            Message::new(
                MessageId::new(format!("msg-remote-{i}")),
                general(),
                NewMessage::new("u9", "Zed", "ping"),
            ),
        );
    }
    assert_eq!(app.channels().unread_badge(&general()).as_deref(), Some("3"));

    app.channels().mark_read(&general());
    assert_eq!(app.channels().unread_count(&general()), 0);
}
