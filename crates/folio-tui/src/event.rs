//! Event types for communication between the backend thread and the UI.

use std::time::Duration;

use folio_core::{MessageId, PendingReply, SessionAvailability};

/// Events sent from the backend to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A scheduled canned reply is due.
    ReplyReady(PendingReply),

    /// Q&A session initialization finished.
    DelegateSession(SessionAvailability),

    /// Accumulated delegate reply text so far.
    DelegateChunk { id: MessageId, text: String },

    /// The delegate stream finished with the full reply.
    DelegateDone { id: MessageId, text: String },

    /// The delegate stream failed.
    DelegateFailed { id: MessageId, error: String },
}

/// Commands sent from the UI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Deliver `pending` back as `UiEvent::ReplyReady` after `delay`.
    ScheduleReply {
        pending: PendingReply,
        delay: Duration,
    },

    /// Drop every reply that has not been delivered yet.
    CancelReplies,

    /// Create the Q&A session if it does not exist yet.
    InitDelegate,

    /// Stream a delegate reply into the placeholder `id`.
    DelegateSend { id: MessageId, text: String },

    /// Quit the application.
    Quit,
}
