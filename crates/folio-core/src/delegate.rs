//! Message log for the free-form Q&A delegate.
//!
//! The delegate keeps its own list, independent from the main conversation.
//! A streamed reply is addressed through the id of the placeholder that
//! `begin_send` appends, never through list position.

use crate::ids::MessageId;
use crate::message::Message;

pub const DELEGATE_GREETING: &str = "Yo! I'm the Vibe Agent. I know everything about Gobinath's work in Agentic AI and Bio-engineering. Ask me anything!";

pub const DELEGATE_FALLBACK_TEXT: &str =
    "My neural link is a bit staticky right now. Try again in a sec.";

/// Whether the hosted-model session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionAvailability {
    /// Initialization has not run yet.
    #[default]
    Unknown,
    /// A session was created.
    Ready,
    /// No credential; sends are ignored.
    Unavailable,
}

/// Delegate message log plus loading state.
#[derive(Debug)]
pub struct DelegateLog {
    messages: Vec<Message>,
    session: SessionAvailability,
    in_flight: Option<MessageId>,
}

impl Default for DelegateLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DelegateLog {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::model(DELEGATE_GREETING)],
            session: SessionAvailability::Unknown,
            in_flight: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session(&self) -> SessionAvailability {
        self.session
    }

    pub fn set_session(&mut self, session: SessionAvailability) {
        self.session = session;
    }

    /// True while a reply is streaming.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a send: append the user turn and the reply placeholder.
    ///
    /// Returns the placeholder id, or `None` when the send is a no-op
    /// (blank input, no session, or a reply still streaming).
    pub fn begin_send(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty()
            || self.session != SessionAvailability::Ready
            || self.in_flight.is_some()
        {
            return None;
        }
        self.messages.push(Message::user(text));
        let placeholder = Message::placeholder();
        let id = placeholder.id;
        self.messages.push(placeholder);
        self.in_flight = Some(id);
        Some(id)
    }

    /// Replace the placeholder text with the accumulated stream so far.
    ///
    /// Returns false if `id` is not in the log.
    pub fn apply_chunk(&mut self, id: MessageId, accumulated: &str) -> bool {
        match self.find_mut(id) {
            Some(msg) => {
                msg.text = Some(accumulated.to_string());
                true
            }
            None => false,
        }
    }

    /// Mark the stream behind `id` as finished.
    pub fn finish(&mut self, id: MessageId) {
        if let Some(msg) = self.find_mut(id) {
            msg.is_streaming = false;
        }
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
    }

    /// Convert a failed stream into the fixed fallback reply.
    ///
    /// An untouched placeholder is dropped so the log shows exactly one
    /// apology; partial text that already arrived is kept.
    pub fn fail(&mut self, id: MessageId) {
        if let Some(pos) = self.messages.iter().position(|m| m.id == id) {
            if self.messages[pos].text().is_empty() {
                self.messages.remove(pos);
            } else {
                self.messages[pos].is_streaming = false;
            }
        }
        self.messages.push(Message::model(DELEGATE_FALLBACK_TEXT));
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
    }

    fn find_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}
