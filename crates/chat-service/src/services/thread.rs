//! Thread service
//!
//! Opens and closes the thread panel.

use chat_core::{ChannelId, DomainError, Message, MessageId, ThreadSelection, UserId};
use tracing::{info, instrument};

use crate::dto::{MessageResponse, MessageWithViewer, ReplyResponse, ReplyWithViewer, ThreadResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open the thread of a root message
    #[instrument(skip(self))]
    pub fn open_thread(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<ThreadResponse> {
        let mut store = self.ctx.lock();
        if store.find_message(channel_id, message_id).is_none() {
            return Err(DomainError::MessageNotFound(message_id.clone()).into());
        }

        store.set_selected_thread(Some(ThreadSelection::new(
            channel_id.clone(),
            message_id.clone(),
        )));
        let root = store
            .thread_view()
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;

        info!("Thread opened");
        Ok(thread_response(root, viewer))
    }

    /// Close the thread panel. Returns whether a thread was open.
    #[instrument(skip(self))]
    pub fn close_thread(&self) -> bool {
        let mut store = self.ctx.lock();
        let was_open = store.selected_thread().is_some();
        store.set_selected_thread(None);
        if was_open {
            info!("Thread closed");
        }
        was_open
    }

    /// Contents of the open thread panel, if any
    pub fn current_thread(&self, viewer: Option<&UserId>) -> Option<ThreadResponse> {
        let store = self.ctx.lock();
        store.thread_view().map(|root| thread_response(root, viewer))
    }

    pub fn selection(&self) -> Option<ThreadSelection> {
        self.ctx.lock().selected_thread().cloned()
    }
}

fn thread_response(root: &Message, viewer: Option<&UserId>) -> ThreadResponse {
    ThreadResponse {
        root: MessageResponse::from(MessageWithViewer::new(root, viewer)),
        replies: root
            .replies()
            .iter()
            .map(|reply| ReplyResponse::from(ReplyWithViewer::new(reply, viewer)))
            .collect(),
    }
}
