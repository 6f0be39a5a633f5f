//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Folio.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown persona name.
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    /// Unknown panel name.
    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    /// Profile data could not be read or parsed.
    #[error("Invalid profile data: {0}")]
    InvalidProfile(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rejected conversation transitions.
///
/// None of these are user-facing: the UI swallows them and leaves the log
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// Submitted text was empty after trimming.
    #[error("empty input")]
    EmptyInput,

    /// A reply is still pending; input is disabled.
    #[error("a reply is already pending")]
    ReplyPending,

    /// Resolve was called with nothing pending.
    #[error("no reply is pending")]
    NothingPending,

    /// The reply belongs to an older conversation version (reset or superseded).
    #[error("stale reply for version {ticket}, conversation is at {current}")]
    StaleReply { ticket: u64, current: u64 },
}
