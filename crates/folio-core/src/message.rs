//! Chat message types for the conversation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MessageId;
use crate::panel::PanelTag;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Visitor input (typed or synthesized by navigation).
    User,
    /// Agent reply.
    Model,
}

/// A message in a conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Stable identifier.
    pub id: MessageId,
    /// Who wrote it.
    pub role: Role,
    /// Message text.
    pub text: Option<String>,
    /// Content panel to render below the text.
    pub panel: Option<PanelTag>,
    /// True while a streamed reply is still arriving.
    pub is_streaming: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message with a fresh id.
    pub fn new(role: Role, text: Option<String>, panel: Option<PanelTag>) -> Self {
        Self {
            id: MessageId::next(),
            role,
            text,
            panel,
            is_streaming: false,
            created_at: Utc::now(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, Some(text.into()), None)
    }

    /// Create a model message.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, Some(text.into()), None)
    }

    /// Create a model message that renders a panel.
    pub fn model_with_panel(text: impl Into<String>, panel: Option<PanelTag>) -> Self {
        Self::new(Role::Model, Some(text.into()), panel)
    }

    /// Create an empty model message that a stream will fill in.
    pub fn placeholder() -> Self {
        let mut msg = Self::new(Role::Model, Some(String::new()), None);
        msg.is_streaming = true;
        msg
    }

    /// Text content, empty if none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
