//! Error types for the generative model SDK.

use thiserror::Error;

/// Errors that can occur while talking to the hosted model.
#[derive(Debug, Error)]
pub enum SdkError {
    /// No API key was found in the environment.
    #[error("No API key configured. Set {0} to enable the Q&A agent.")]
    MissingApiKey(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed or truncated event stream.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The stream ended without producing any text.
    #[error("Model returned an empty reply")]
    EmptyReply,
}
