//! In-memory message store
//!
//! Owns every channel's message sequence, the open thread and the read
//! markers. All operations are synchronous and infallible: an id that does not
//! resolve turns the call into a no-op. Each state change is published to the
//! registered [`EventSink`]s; no-ops publish nothing.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chat_core::events::{
    ChannelReadEvent, MessageCreatedEvent, ReactionEvent, ReplyAddedEvent,
    ThreadSelectionChangedEvent,
};
use chat_core::{
    ChannelId, DomainEvent, EventOrigin, EventSink, Message, MessageId, MessageIdGenerator,
    MessageKind, NewMessage, Reply, ThreadSelection, UserId,
};
use tracing::debug;

use super::read_markers::ReadMarkers;

/// Root message or reply that a reaction is applied to
enum ReactionTarget<'a> {
    Root(&'a mut Message),
    Reply(&'a mut Reply),
}

impl ReactionTarget<'_> {
    fn add(&mut self, emoji: &str, user_id: &UserId) -> bool {
        match self {
            Self::Root(m) => m.add_reaction(emoji, user_id),
            Self::Reply(r) => r.add_reaction(emoji, user_id),
        }
    }

    fn remove(&mut self, emoji: &str, user_id: &UserId) -> bool {
        match self {
            Self::Root(m) => m.remove_reaction(emoji, user_id),
            Self::Reply(r) => r.remove_reaction(emoji, user_id),
        }
    }
}

/// The authoritative in-session copy of all channel messages
#[derive(Default)]
pub struct MessageStore {
    channels: HashMap<ChannelId, Vec<Message>>,
    selected_thread: Option<ThreadSelection>,
    read_markers: ReadMarkers,
    id_generator: MessageIdGenerator,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageStore")
            .field("channels", &self.channels.len())
            .field("selected_thread", &self.selected_thread)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl MessageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink that receives every change
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn add_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    fn publish(&self, event: DomainEvent) {
        debug!(event_type = event.event_type(), "Publishing store event");
        for sink in &self.sinks {
            sink.publish(&event);
        }
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Append a new root message to the channel and return its id.
    ///
    /// Content is stored as given; rejecting empty input is the caller's job.
    pub fn post_message(&mut self, channel_id: &ChannelId, input: NewMessage) -> MessageId {
        let id = self.id_generator.generate(MessageKind::Root);
        let message = Message::new(id.clone(), channel_id.clone(), input);

        debug!(message_id = %id, channel_id = %channel_id, "Message posted");
        self.channels
            .entry(channel_id.clone())
            .or_default()
            .push(message.clone());
        self.publish(DomainEvent::MessageCreated(MessageCreatedEvent::new(
            EventOrigin::Local,
            message,
        )));
        id
    }

    /// Append a reply to the thread of `parent_id`.
    ///
    /// Returns `None` without touching anything if the parent is not a root
    /// message of the channel.
    pub fn post_reply(
        &mut self,
        channel_id: &ChannelId,
        parent_id: &MessageId,
        input: NewMessage,
    ) -> Option<MessageId> {
        if self.find_message(channel_id, parent_id).is_none() {
            debug!(parent_id = %parent_id, channel_id = %channel_id, "Reply parent not found, ignoring");
            return None;
        }
        let id = self.id_generator.generate(MessageKind::Reply);
        let reply = Reply::new(id.clone(), channel_id.clone(), parent_id.clone(), input);
        self.attach_reply(channel_id, reply, EventOrigin::Local)
            .then_some(id)
    }

    fn attach_reply(&mut self, channel_id: &ChannelId, reply: Reply, origin: EventOrigin) -> bool {
        let Some(parent) = self
            .channels
            .get_mut(channel_id)
            .and_then(|messages| messages.iter_mut().find(|m| m.id == reply.parent_id))
        else {
            return false;
        };

        if !parent.push_reply(reply.clone()) {
            return false;
        }
        let reply_count = parent.reply_count();

        debug!(
            reply_id = %reply.id,
            parent_id = %reply.parent_id,
            reply_count,
            "Reply added"
        );
        self.publish(DomainEvent::ReplyAdded(ReplyAddedEvent::new(
            origin,
            reply,
            reply_count,
        )));
        true
    }

    /// Merge a message that arrived from outside this session.
    ///
    /// The message is appended to the channel's sequence. A message whose id
    /// is already used in the channel, by a root or a reply (for example the
    /// echo of a local post), is ignored. The channel argument wins over the
    /// message's own channel id, and any embedded replies are re-parented to
    /// the message; replies with an id already in use are dropped.
    pub fn merge_remote_message(&mut self, channel_id: &ChannelId, mut message: Message) -> bool {
        if self.id_in_use(channel_id, &message.id) {
            debug!(message_id = %message.id, "Remote message already present, ignoring");
            return false;
        }

        let root_id = message.id.clone();
        let dropped = message.rehome(channel_id, |id| {
            id == &root_id || self.id_in_use(channel_id, id)
        });
        if dropped > 0 {
            debug!(message_id = %root_id, dropped, "Dropped conflicting remote replies");
        }

        debug!(message_id = %message.id, channel_id = %channel_id, "Remote message merged");
        self.channels
            .entry(channel_id.clone())
            .or_default()
            .push(message.clone());
        self.publish(DomainEvent::MessageCreated(MessageCreatedEvent::new(
            EventOrigin::Remote,
            message,
        )));
        true
    }

    /// Merge a reply that arrived from outside this session; same rules as
    /// [`post_reply`](Self::post_reply), plus replies whose id is already
    /// used in the channel are ignored.
    pub fn merge_remote_reply(
        &mut self,
        channel_id: &ChannelId,
        parent_id: &MessageId,
        mut reply: Reply,
    ) -> bool {
        if self.id_in_use(channel_id, &reply.id) {
            debug!(reply_id = %reply.id, "Remote reply already present, ignoring");
            return false;
        }
        reply.channel_id = channel_id.clone();
        reply.parent_id = parent_id.clone();
        self.attach_reply(channel_id, reply, EventOrigin::Remote)
    }

    fn id_in_use(&self, channel_id: &ChannelId, id: &MessageId) -> bool {
        self.find_message(channel_id, id).is_some() || self.find_reply(channel_id, id).is_some()
    }

    // =========================================================================
    // Reactions
    // =========================================================================

    fn reaction_target(
        &mut self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> Option<ReactionTarget<'_>> {
        let messages = self.channels.get_mut(channel_id)?;
        let pos = messages
            .iter()
            .position(|m| &m.id == message_id || m.find_reply(message_id).is_some())?;
        let message = &mut messages[pos];
        if &message.id == message_id {
            Some(ReactionTarget::Root(message))
        } else {
            message.find_reply_mut(message_id).map(ReactionTarget::Reply)
        }
    }

    /// Add `user_id`'s `emoji` reaction to a message or reply.
    ///
    /// Returns whether anything changed; reacting twice is a no-op.
    pub fn add_reaction(
        &mut self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
        user_id: &UserId,
    ) -> bool {
        let changed = self
            .reaction_target(channel_id, message_id)
            .is_some_and(|mut target| target.add(emoji, user_id));
        if changed {
            debug!(message_id = %message_id, user_id = %user_id, emoji, "Reaction added");
            self.publish(DomainEvent::ReactionAdded(ReactionEvent::new(
                channel_id.clone(),
                message_id.clone(),
                user_id.clone(),
                emoji.to_owned(),
            )));
        }
        changed
    }

    /// Remove `user_id`'s `emoji` reaction. A reaction left with no users is
    /// dropped. Returns whether anything changed.
    pub fn remove_reaction(
        &mut self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
        user_id: &UserId,
    ) -> bool {
        let changed = self
            .reaction_target(channel_id, message_id)
            .is_some_and(|mut target| target.remove(emoji, user_id));
        if changed {
            debug!(message_id = %message_id, user_id = %user_id, emoji, "Reaction removed");
            self.publish(DomainEvent::ReactionRemoved(ReactionEvent::new(
                channel_id.clone(),
                message_id.clone(),
                user_id.clone(),
                emoji.to_owned(),
            )));
        }
        changed
    }

    /// Check whether `user_id` has reacted with `emoji` on a message or reply
    pub fn has_reacted(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
        user_id: &UserId,
    ) -> bool {
        use chat_core::Post;

        if let Some(message) = self.find_message(channel_id, message_id) {
            return message.reactions().has_reacted(emoji, user_id);
        }
        self.find_reply(channel_id, message_id)
            .is_some_and(|reply| reply.reactions().has_reacted(emoji, user_id))
    }

    // =========================================================================
    // Thread selection
    // =========================================================================

    /// Replace the open thread (`None` closes the panel)
    pub fn set_selected_thread(&mut self, selection: Option<ThreadSelection>) {
        if self.selected_thread == selection {
            return;
        }
        debug!(?selection, "Thread selection changed");
        self.selected_thread.clone_from(&selection);
        self.publish(DomainEvent::ThreadSelectionChanged(
            ThreadSelectionChangedEvent::new(selection),
        ));
    }

    #[inline]
    pub fn selected_thread(&self) -> Option<&ThreadSelection> {
        self.selected_thread.as_ref()
    }

    /// Root message of the open thread, if a thread is open and its root
    /// still resolves
    pub fn thread_view(&self) -> Option<&Message> {
        let selection = self.selected_thread.as_ref()?;
        self.find_message(&selection.channel_id, &selection.message_id)
    }

    // =========================================================================
    // Read markers
    // =========================================================================

    /// Mark every message currently in the channel as read
    pub fn mark_channel_read(&mut self, channel_id: &ChannelId) {
        let total = self.message_count(channel_id);
        if self.read_markers.mark(channel_id, total) {
            debug!(channel_id = %channel_id, seen = total, "Channel marked read");
            self.publish(DomainEvent::ChannelRead(ChannelReadEvent::new(
                channel_id.clone(),
            )));
        }
    }

    /// Root messages that arrived after the channel was last marked read
    pub fn unread_count(&self, channel_id: &ChannelId) -> usize {
        self.read_markers
            .unread(channel_id, self.message_count(channel_id))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Root messages of a channel in insertion order (empty if unknown)
    pub fn messages(&self, channel_id: &ChannelId) -> &[Message] {
        self.channels.get(channel_id).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn message_count(&self, channel_id: &ChannelId) -> usize {
        self.messages(channel_id).len()
    }

    /// Channels that have at least one message
    pub fn channel_ids(&self) -> impl Iterator<Item = &ChannelId> {
        self.channels.keys()
    }

    pub fn find_message(&self, channel_id: &ChannelId, message_id: &MessageId) -> Option<&Message> {
        self.messages(channel_id).iter().find(|m| &m.id == message_id)
    }

    pub fn find_reply(&self, channel_id: &ChannelId, reply_id: &MessageId) -> Option<&Reply> {
        self.messages(channel_id)
            .iter()
            .find_map(|m| m.find_reply(reply_id))
    }
}
