//! HTTP client for the hosted model's streaming endpoint.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::SdkError;
use crate::session::ChatBackend;
use crate::sse::{SseDecoder, SseEvent};
use crate::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

/// Default REST base for model endpoints.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Streaming client for `streamGenerateContent`.
#[derive(Clone)]
pub struct GenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GenAiClient {
    /// Create a client with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a client from the first non-empty variable in [`API_KEY_VARS`].
    pub fn from_env() -> Result<Self, SdkError> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| SdkError::MissingApiKey(API_KEY_VARS.join(" or ")))
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the REST base URL (without trailing slash).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse",
            self.api_base, self.model
        )
    }

    /// Run one streaming generation.
    ///
    /// `on_text` receives each text fragment in arrival order. Returns the
    /// concatenated reply.
    pub async fn stream_generate(
        &self,
        request: &GenerateContentRequest,
        on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
    ) -> Result<String, SdkError> {
        info!(
            model = %self.model,
            turns = request.contents.len(),
            "Starting streamed generation"
        );

        let mut response = self
            .http
            .post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_api_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Generation request rejected");
            return Err(err);
        }

        let mut decoder = SseDecoder::new();
        let mut reply = String::new();

        while let Some(chunk) = response.chunk().await? {
            for event in decoder.push(&chunk) {
                handle_event(&event, &mut reply, on_text)?;
            }
        }
        if let Some(event) = decoder.finish() {
            handle_event(&event, &mut reply, on_text)?;
        }

        if reply.is_empty() {
            return Err(SdkError::EmptyReply);
        }
        debug!(chars = reply.len(), "Streamed generation complete");
        Ok(reply)
    }
}

#[async_trait]
impl ChatBackend for GenAiClient {
    async fn stream_generate(
        &self,
        request: &GenerateContentRequest,
        on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
    ) -> Result<String, SdkError> {
        GenAiClient::stream_generate(self, request, on_text).await
    }
}

/// Apply one stream event to the reply.
fn handle_event(
    event: &SseEvent,
    reply: &mut String,
    on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
) -> Result<(), SdkError> {
    if event.data.trim() == "[DONE]" {
        return Ok(());
    }

    let response: GenerateContentResponse = match serde_json::from_str(&event.data) {
        Ok(response) => response,
        Err(parse_err) => {
            // Errors can also arrive in-band once the stream has started.
            return Err(match serde_json::from_str::<ApiErrorBody>(&event.data) {
                Ok(body) => SdkError::Api {
                    status: body.error.code.unwrap_or(500),
                    message: body.error.message,
                },
                Err(_) => SdkError::JsonError(parse_err),
            });
        }
    };

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(SdkError::StreamError(format!("prompt blocked: {}", reason)));
    }

    if let Some(fragment) = response.text() {
        reply.push_str(&fragment);
        on_text(&fragment);
    }
    Ok(())
}

/// Turn a non-success response into an error, keeping the API's message.
fn map_api_error(status: u16, body: &str) -> SdkError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ if body.trim().is_empty() => "no response body".to_string(),
        _ => body.chars().take(200).collect(),
    };
    SdkError::Api { status, message }
}
