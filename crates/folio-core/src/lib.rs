//! Folio Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Terminal rendering
//! - Runtime specifics
//!
//! All types here represent the portfolio chat domain: the intent router,
//! the conversation state machine, the Q&A delegate log, and the static
//! profile content the panels render.

pub mod conversation;
pub mod delegate;
pub mod error;
pub mod ids;
pub mod message;
pub mod panel;
pub mod persona;
pub mod profile;
pub mod router;
pub mod storage;

// Re-export commonly used types
pub use conversation::{Conversation, ConversationPhase, PendingReply};
pub use delegate::{DelegateLog, SessionAvailability, DELEGATE_FALLBACK_TEXT, DELEGATE_GREETING};
pub use error::{ConversationError, CoreError};
pub use ids::{MessageId, SessionId};
pub use message::{Message, Role};
pub use panel::{PanelRoute, PanelTag, PANEL_ROUTES, SIDEBAR_ORDER};
pub use persona::Persona;
pub use profile::ProfileData;
pub use router::{route, Reply};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
