//! # chat-cli
//!
//! Replays a JSON-lines script of user actions against the service layer and
//! writes a plain-text transcript of what the client would show.

pub mod events;
pub mod script;
pub mod transcript;

use std::io::{BufRead, Write};

use anyhow::Context;
use chat_common::{AppError, ErrorResponse};
use chat_core::{ChannelId, DomainError, Message, MessageId, NewMessage, UserId};
use chat_service::dto::{ReactionRequest, SendMessageRequest};
use chat_service::{
    ChannelService, MessageService, ReactionService, ServiceContext, ServiceResult, ThreadService,
};
use chrono::Utc;
use tracing::{info, warn};

use script::{parse_line, Command, Labels};

/// Counters for one replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub failed: usize,
}

/// Applies script commands to a service context
#[derive(Debug)]
pub struct Replayer {
    ctx: ServiceContext,
    labels: Labels,
}

impl Replayer {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            labels: Labels::new(),
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Replay every line of `input`, writing transcripts to `out`.
    ///
    /// Lines that fail to parse abort the replay; commands the services
    /// reject are reported in the transcript and counted as failed.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line.with_context(|| format!("failed to read line {line_no}"))?;
            let Some(command) =
                parse_line(&line).with_context(|| format!("invalid command on line {line_no}"))?
            else {
                continue;
            };

            let op = command.op();
            match self.apply(command) {
                Ok(Some(text)) => {
                    out.write_all(text.as_bytes())?;
                    summary.applied += 1;
                }
                Ok(None) => summary.applied += 1,
                Err(e) => {
                    let rejected = ErrorResponse::from(AppError::from(e));
                    warn!(line = line_no, op, code = %rejected.code, error = %rejected.message, "Command rejected");
                    writeln!(out, "! line {line_no} ({op}) [{}]: {}", rejected.code, rejected.message)?;
                    summary.failed += 1;
                }
            }
        }

        info!(applied = summary.applied, failed = summary.failed, "Replay finished");
        Ok(summary)
    }

    /// Apply one command; returns transcript text for display commands
    pub fn apply(&mut self, command: Command) -> ServiceResult<Option<String>> {
        match command {
            Command::Post {
                channel,
                author_id,
                author_name,
                content,
                attachments,
                label,
            } => {
                let mut request = SendMessageRequest::new(author_id, author_name, content);
                request.attachments = attachments;
                let sent = MessageService::new(&self.ctx).send_message(&channel_id(&channel)?, request)?;
                if let (Some(label), Some(sent)) = (label, sent) {
                    self.labels.insert(label, MessageId::new(sent.id));
                }
                Ok(None)
            }
            Command::Reply {
                channel,
                parent,
                author_id,
                author_name,
                content,
                label,
            } => {
                let parent_id = self.labels.resolve(&parent);
                let sent = MessageService::new(&self.ctx).send_reply(
                    &channel_id(&channel)?,
                    &parent_id,
                    SendMessageRequest::new(author_id, author_name, content),
                )?;
                if let (Some(label), Some(sent)) = (label, sent) {
                    self.labels.insert(label, MessageId::new(sent.id));
                }
                Ok(None)
            }
            Command::Remote {
                channel,
                id,
                author_id,
                author_name,
                content,
            } => {
                let target = channel_id(&channel)?;
                let message = Message::new(
                    MessageId::parse(&id).map_err(DomainError::from)?,
                    target.clone(),
                    NewMessage::new(UserId::new(author_id), author_name, content),
                );
                MessageService::new(&self.ctx).receive_remote(&target, message);
                Ok(None)
            }
            Command::React {
                channel,
                message,
                user_id,
                emoji,
            } => {
                ReactionService::new(&self.ctx).add_reaction(
                    &channel_id(&channel)?,
                    &self.labels.resolve(&message),
                    ReactionRequest::new(user_id, emoji),
                )?;
                Ok(None)
            }
            Command::Unreact {
                channel,
                message,
                user_id,
                emoji,
            } => {
                ReactionService::new(&self.ctx).remove_reaction(
                    &channel_id(&channel)?,
                    &self.labels.resolve(&message),
                    ReactionRequest::new(user_id, emoji),
                )?;
                Ok(None)
            }
            Command::Toggle {
                channel,
                message,
                user_id,
                emoji,
            } => {
                ReactionService::new(&self.ctx).toggle_reaction(
                    &channel_id(&channel)?,
                    &self.labels.resolve(&message),
                    ReactionRequest::new(user_id, emoji),
                )?;
                Ok(None)
            }
            Command::OpenThread {
                channel,
                message,
                viewer,
            } => {
                let viewer = viewer.map(UserId::new);
                let thread = ThreadService::new(&self.ctx).open_thread(
                    &channel_id(&channel)?,
                    &self.labels.resolve(&message),
                    viewer.as_ref(),
                )?;
                Ok(Some(transcript::render_thread(&thread, &Utc::now())))
            }
            Command::CloseThread => {
                ThreadService::new(&self.ctx).close_thread();
                Ok(None)
            }
            Command::MarkRead { channel } => {
                ChannelService::new(&self.ctx).mark_read(&channel_id(&channel)?);
                Ok(None)
            }
            Command::Show { channel, viewer } => {
                let viewer = viewer.map(UserId::new);
                let items = MessageService::new(&self.ctx)
                    .list_messages(&channel_id(&channel)?, viewer.as_ref());
                Ok(Some(transcript::render_channel(&channel, &items, &Utc::now())))
            }
            Command::Channels => {
                let channels = ChannelService::new(&self.ctx).channel_summaries();
                Ok(Some(transcript::render_channels(&channels)))
            }
        }
    }
}

/// Channel names in scripts must be non-empty and free of whitespace
fn channel_id(name: &str) -> ServiceResult<ChannelId> {
    Ok(ChannelId::parse(name).map_err(DomainError::from)?)
}
