//! Conversation state machine over an append-only message log.
//!
//! Transitions:
//! - `submit` / `navigate`: `Idle | Settled -> AwaitingReply`
//! - `resolve`: `AwaitingReply -> Settled`
//! - `reset`: any state -> `Settled` with the two reset messages
//!
//! Every `reset` and every accepted submission bumps `version`. A
//! `PendingReply` remembers the version it was issued for, so a reply that
//! was scheduled before a reset is rejected instead of landing in the fresh
//! log.

use crate::error::ConversationError;
use crate::message::Message;
use crate::panel::PanelTag;
use crate::persona::{Persona, DEFAULT_GREETING};
use crate::router::{route, Reply};

pub const IDENTITY_LOADING_TEXT: &str = "Accessing primary identity module...";
pub const RESET_TEXT: &str = "Session reset. Hello again.";
pub const READY_TEXT: &str = "Ready for new command.";

/// Where the conversation is in its submit/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationPhase {
    /// No messages yet.
    #[default]
    Idle,
    /// A user message was appended and its reply is pending.
    AwaitingReply,
    /// The last reply has been appended.
    Settled,
}

/// A reply waiting to be appended, bound to the version that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub version: u64,
    pub reply: Reply,
}

/// In-memory conversation for one visitor session.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    phase: ConversationPhase,
    version: u64,
}

impl Conversation {
    /// Create an empty, idle conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log with the greeting for `persona`.
    pub fn start(persona: Option<Persona>) -> Self {
        let greeting = persona.map(|p| p.greeting()).unwrap_or(DEFAULT_GREETING);
        Self {
            messages: vec![
                Message::model(greeting),
                Message::model_with_panel(IDENTITY_LOADING_TEXT, Some(PanelTag::About)),
            ],
            phase: ConversationPhase::Settled,
            version: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    /// Whether the input surface accepts a new submission.
    pub fn input_enabled(&self) -> bool {
        self.phase != ConversationPhase::AwaitingReply
    }

    /// Append a typed user message and route it.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, ConversationError> {
        if text.trim().is_empty() {
            return Err(ConversationError::EmptyInput);
        }
        self.begin(text, route(text))
    }

    /// Append the fixed navigation prompt for `panel`.
    pub fn navigate(&mut self, panel: PanelTag) -> Result<PendingReply, ConversationError> {
        self.begin(panel.route().nav_prompt, Reply::for_navigation(panel))
    }

    fn begin(&mut self, text: &str, reply: Reply) -> Result<PendingReply, ConversationError> {
        if self.phase == ConversationPhase::AwaitingReply {
            return Err(ConversationError::ReplyPending);
        }
        self.messages.push(Message::user(text));
        self.phase = ConversationPhase::AwaitingReply;
        self.version += 1;
        Ok(PendingReply {
            version: self.version,
            reply,
        })
    }

    /// Append the model reply for a pending submission.
    pub fn resolve(&mut self, pending: PendingReply) -> Result<&Message, ConversationError> {
        if pending.version != self.version {
            return Err(ConversationError::StaleReply {
                ticket: pending.version,
                current: self.version,
            });
        }
        if self.phase != ConversationPhase::AwaitingReply {
            return Err(ConversationError::NothingPending);
        }
        self.messages.push(Message::model_with_panel(
            pending.reply.text,
            pending.reply.panel,
        ));
        self.phase = ConversationPhase::Settled;
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Replace the log with the two reset messages, invalidating any pending reply.
    pub fn reset(&mut self) {
        self.messages = vec![
            Message::model(RESET_TEXT),
            Message::model_with_panel(READY_TEXT, Some(PanelTag::About)),
        ];
        self.phase = ConversationPhase::Settled;
        self.version += 1;
    }
}
