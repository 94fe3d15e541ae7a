//! Reaction Integration Tests
//!
//! Run with: cargo test -p integration-tests --test reaction_tests

use std::collections::{HashMap, HashSet};

use chat_core::{ChannelId, NewMessage, Post, UserId};
use chat_store::MessageStore;
use integration_tests::{general, TestApp, TestUser};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_double_reaction_counts_once() {
    let app = TestApp::new();
    let id = app.post(&general(), &TestUser::alice(), "hello");
    let bob = TestUser::bob();

    app.reactions().add_reaction(&general(), &id, bob.reacts("👍")).unwrap();
    let second = app.reactions().add_reaction(&general(), &id, bob.reacts("👍")).unwrap();

    assert!(!second.changed);
    assert_eq!(second.reactions.len(), 1);
    assert_eq!(second.reactions[0].emoji, "👍");
    assert_eq!(second.reactions[0].count, 1);

    let store = app.ctx.lock();
    let message = store.find_message(&general(), &id).unwrap();
    let thumbs = message.reactions().get("👍").unwrap();
    assert_eq!(thumbs.users().len(), 1);
    assert!(thumbs.has_user(&bob.id));
}

#[test]
fn test_add_then_remove_leaves_no_entry() {
    let app = TestApp::new();
    let alice = TestUser::alice();
    let id = app.post(&general(), &alice, "party");

    app.reactions().add_reaction(&general(), &id, alice.reacts("🎉")).unwrap();
    let removed = app
        .reactions()
        .remove_reaction(&general(), &id, alice.reacts("🎉"))
        .unwrap();

    assert!(removed.changed);
    assert!(removed.reactions.is_empty());
    let listed = app.messages().list_messages(&general(), None);
    assert!(listed[0].message.reactions.is_empty());
}

#[test]
fn test_chips_flag_viewer_and_keep_order() {
    let app = TestApp::new();
    let id = app.post(&general(), &TestUser::alice(), "vote");
    let bob = TestUser::bob();
    let carol = TestUser::carol();

    app.reactions().add_reaction(&general(), &id, carol.reacts("😂")).unwrap();
    app.reactions().add_reaction(&general(), &id, bob.reacts("👍")).unwrap();
    app.reactions().add_reaction(&general(), &id, carol.reacts("👍")).unwrap();

    let listed = app.messages().list_messages(&general(), Some(&bob.id));
    let chips = &listed[0].message.reactions;
    assert_eq!(chips[0].emoji, "😂");
    assert!(!chips[0].me);
    assert_eq!(chips[1].emoji, "👍");
    assert_eq!(chips[1].count, 2);
    assert!(chips[1].me);
}

#[test]
fn test_noop_reactions_publish_nothing() {
    let app = TestApp::new();
    let id = app.post(&general(), &TestUser::alice(), "quiet");
    app.take_event_types();

    let bob = TestUser::bob();
    app.reactions().remove_reaction(&general(), &id, bob.reacts("👍")).unwrap();
    app.reactions().add_reaction(&general(), &id, bob.reacts("👍")).unwrap();
    app.reactions().add_reaction(&general(), &id, bob.reacts("👍")).unwrap();

    assert_eq!(app.take_event_types(), ["REACTION_ADDED"]);
}

#[test]
fn test_net_reactions_match_random_sequences() {
    let mut rng = StdRng::seed_from_u64(42);
    let emojis = ["👍", "🎉", "❤️"];
    let users: Vec<UserId> = (0..6).map(|i| UserId::new(format!("u{i}"))).collect();
    let channel = ChannelId::new("fuzz");

    for _ in 0..20 {
        let mut store = MessageStore::new();
        let id = store.post_message(&channel, NewMessage::new("u0", "Owner", "target"));
        let mut expected: HashMap<&str, HashSet<&UserId>> = HashMap::new();

        for _ in 0..100 {
            let emoji = emojis[rng.gen_range(0..emojis.len())];
            let user = &users[rng.gen_range(0..users.len())];
            let set = expected.entry(emoji).or_default();
            if rng.gen_bool(0.6) {
                let changed = store.add_reaction(&channel, &id, emoji, user);
                assert_eq!(changed, set.insert(user));
            } else {
                let changed = store.remove_reaction(&channel, &id, emoji, user);
                assert_eq!(changed, set.remove(user));
            }
        }

        let message = store.find_message(&channel, &id).unwrap();
        for emoji in emojis {
            let want = expected.get(emoji).cloned().unwrap_or_default();
            match message.reactions().get(emoji) {
                Some(reaction) => {
                    assert_eq!(reaction.count(), want.len());
                    assert_eq!(reaction.users().iter().collect::<HashSet<_>>(), want);
                }
                None => assert!(want.is_empty()),
            }
        }
        assert!(message.reactions().iter().all(|r| r.count() > 0));
    }
}
