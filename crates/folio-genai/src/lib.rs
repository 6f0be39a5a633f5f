//! Generative model SDK for Folio
//!
//! This crate wraps the hosted model's `streamGenerateContent` endpoint:
//! an HTTP client that decodes the Server-Sent Events stream, and a chat
//! session that keeps multi-turn history behind the [`ChatBackend`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio_genai::{ChatSession, GenAiClient};
//!
//! async fn ask() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GenAiClient::from_env()?.with_model("gemini-3-flash-preview");
//!     let mut session = ChatSession::new(Arc::new(client), "You are a helpful guide.");
//!
//!     let reply = session
//!         .send_message_stream("What has he shipped?", |so_far| print!("\r{}", so_far))
//!         .await?;
//!
//!     println!("\nFinal: {}", reply);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod session;
mod sse;
mod types;

// Re-export main types
pub use client::{GenAiClient, API_KEY_VARS, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use error::SdkError;
pub use session::{ChatBackend, ChatSession};
pub use sse::{SseDecoder, SseEvent};
pub use types::{
    ApiErrorBody, ApiErrorDetail, Candidate, Content, ContentRole, GenerateContentRequest,
    GenerateContentResponse, Part, PromptFeedback,
};
