//! Multi-turn chat sessions on top of a streaming backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::SdkError;
use crate::types::{Content, GenerateContentRequest};

/// A backend that can stream one generation.
///
/// Implemented by [`GenAiClient`](crate::GenAiClient); tests plug in
/// scripted backends instead.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Stream a reply to `request`, calling `on_text` with each fragment.
    ///
    /// Returns the full reply text.
    async fn stream_generate(
        &self,
        request: &GenerateContentRequest,
        on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
    ) -> Result<String, SdkError>;
}

/// A chat with a fixed system instruction and accumulated history.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    system_instruction: Content,
    history: Vec<Content>,
}

impl ChatSession {
    /// Create a session. The system instruction is sent with every turn.
    pub fn new(backend: Arc<dyn ChatBackend>, system_instruction: impl Into<String>) -> Self {
        Self {
            backend,
            system_instruction: Content::system(system_instruction),
            history: Vec::new(),
        }
    }

    /// Completed turns, oldest first.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Send a user message and stream the reply.
    ///
    /// `on_update` receives the accumulated reply text after every fragment.
    /// The turn is only added to the history when the stream completes, so a
    /// failed send can simply be retried.
    pub async fn send_message_stream<F>(
        &mut self,
        message: &str,
        mut on_update: F,
    ) -> Result<String, SdkError>
    where
        F: FnMut(&str) + Send,
    {
        let user_turn = Content::user(message);
        let mut contents = self.history.clone();
        contents.push(user_turn.clone());
        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(self.system_instruction.clone()),
        };

        let mut accumulated = String::new();
        let mut forward = |fragment: &str| {
            accumulated.push_str(fragment);
            on_update(&accumulated);
        };

        match self.backend.stream_generate(&request, &mut forward).await {
            Ok(reply) => {
                debug!(turns = self.history.len() + 2, "Chat turn complete");
                self.history.push(user_turn);
                self.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentRole;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Plays back canned fragment lists, one per call.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Result<Vec<&'static str>, SdkError>>>,
        requests: Mutex<Vec<GenerateContentRequest>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<Vec<&'static str>, SdkError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn stream_generate(
            &self,
            request: &GenerateContentRequest,
            on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
        ) -> Result<String, SdkError> {
            self.requests.lock().unwrap().push(request.clone());
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SdkError::EmptyReply));
            let fragments = next?;
            for fragment in &fragments {
                on_text(fragment);
            }
            Ok(fragments.concat())
        }
    }

    #[tokio::test]
    async fn test_streams_accumulated_text() {
        let backend = ScriptedBackend::new(vec![Ok(vec!["He ", "shipped ", "it."])]);
        let mut session = ChatSession::new(backend.clone(), "system");

        let mut updates = Vec::new();
        let reply = session
            .send_message_stream("what shipped?", |acc| updates.push(acc.to_string()))
            .await
            .unwrap();

        assert_eq!(reply, "He shipped it.");
        assert_eq!(updates, vec!["He ", "He shipped ", "He shipped it."]);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].role, Some(ContentRole::Model));
    }

    #[tokio::test]
    async fn test_history_is_sent_on_follow_up() {
        let backend = ScriptedBackend::new(vec![Ok(vec!["one"]), Ok(vec!["two"])]);
        let mut session = ChatSession::new(backend.clone(), "be brief");

        session.send_message_stream("first", |_| {}).await.unwrap();
        session.send_message_stream("second", |_| {}).await.unwrap();

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        let texts: Vec<String> = second.contents.iter().map(|c| c.text()).collect();
        assert_eq!(texts, vec!["first", "one", "second"]);
        assert_eq!(
            second.system_instruction.as_ref().map(|c| c.text()).as_deref(),
            Some("be brief")
        );
    }

    #[tokio::test]
    async fn test_failed_turn_leaves_history_untouched() {
        let backend = ScriptedBackend::new(vec![
            Err(SdkError::StreamError("connection reset".into())),
            Ok(vec!["ok"]),
        ]);
        let mut session = ChatSession::new(backend.clone(), "system");

        let err = session.send_message_stream("q", |_| {}).await.unwrap_err();
        assert!(matches!(err, SdkError::StreamError(_)));
        assert!(session.history().is_empty());

        session.send_message_stream("q", |_| {}).await.unwrap();
        assert_eq!(session.history().len(), 2);
    }
}
