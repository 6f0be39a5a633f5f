//! Background task for reply timers and the Q&A stream.

use std::sync::Arc;

use folio_core::{MessageId, SessionAvailability};
use folio_genai::{ChatBackend, ChatSession};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::event::{BackendCommand, UiEvent};
use crate::scheduler::ReplyScheduler;

/// Run the backend loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// It owns the reply timers and the hosted-model chat session, and reports
/// back to the UI thread via the `ui_tx` channel. `chat_backend` is `None`
/// when no API key is configured.
pub async fn run_backend(
    chat_backend: Option<Arc<dyn ChatBackend>>,
    system_instruction: String,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    let mut scheduler = ReplyScheduler::new(ui_tx.clone());
    let mut session: Option<Arc<Mutex<ChatSession>>> = None;
    let streams = TaskTracker::new();
    let shutdown = CancellationToken::new();

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::ScheduleReply { pending, delay } => {
                scheduler.schedule(pending, delay);
            }
            BackendCommand::CancelReplies => {
                debug!(pending = scheduler.pending(), "Cancelling scheduled replies");
                scheduler.cancel_all();
            }
            BackendCommand::InitDelegate => {
                if session.is_none() {
                    session = chat_backend.as_ref().map(|backend| {
                        Arc::new(Mutex::new(ChatSession::new(
                            backend.clone(),
                            system_instruction.clone(),
                        )))
                    });
                }
                let availability = if session.is_some() {
                    SessionAvailability::Ready
                } else {
                    warn!("No API key configured, Q&A agent disabled");
                    SessionAvailability::Unavailable
                };
                let _ = ui_tx.send(UiEvent::DelegateSession(availability)).await;
            }
            BackendCommand::DelegateSend { id, text } => {
                let Some(session) = session.clone() else {
                    let _ = ui_tx
                        .send(UiEvent::DelegateFailed {
                            id,
                            error: "session not initialized".to_string(),
                        })
                        .await;
                    continue;
                };
                let ui_tx = ui_tx.clone();
                let token = shutdown.child_token();
                streams.spawn(stream_reply(session, id, text, ui_tx, token));
            }
            BackendCommand::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
        }
    }

    shutdown.cancel();
    scheduler.shutdown().await;
    streams.close();
    streams.wait().await;

    info!("Backend shutdown complete");
}

/// Stream one Q&A reply, forwarding the accumulated text as it grows.
async fn stream_reply(
    session: Arc<Mutex<ChatSession>>,
    id: MessageId,
    text: String,
    ui_tx: mpsc::Sender<UiEvent>,
    token: CancellationToken,
) {
    let mut session = session.lock().await;
    let chunk_tx = ui_tx.clone();
    let send = session.send_message_stream(&text, move |so_far| {
        // Best effort; DelegateDone carries the full text.
        let _ = chunk_tx.try_send(UiEvent::DelegateChunk {
            id,
            text: so_far.to_string(),
        });
    });

    let event = tokio::select! {
        _ = token.cancelled() => {
            debug!(%id, "Q&A stream cancelled");
            return;
        }
        result = send => match result {
            Ok(reply) => {
                debug!(%id, len = reply.len(), "Q&A stream complete");
                UiEvent::DelegateDone { id, text: reply }
            }
            Err(e) => UiEvent::DelegateFailed {
                id,
                error: e.to_string(),
            },
        },
    };
    let _ = ui_tx.send(event).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_core::Conversation;
    use folio_genai::{GenerateContentRequest, SdkError};
    use std::time::Duration;

    /// Streams fixed fragments, or fails when `fail` is set.
    struct ScriptedBackend {
        fragments: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn stream_generate(
            &self,
            _request: &GenerateContentRequest,
            on_text: &mut (dyn for<'s> FnMut(&'s str) + Send),
        ) -> Result<String, SdkError> {
            if self.fail {
                return Err(SdkError::StreamError("connection reset".into()));
            }
            for fragment in &self.fragments {
                on_text(fragment);
            }
            Ok(self.fragments.concat())
        }
    }

    struct Harness {
        cmd_tx: mpsc::Sender<BackendCommand>,
        ui_rx: mpsc::Receiver<UiEvent>,
        handle: tokio::task::JoinHandle<()>,
    }

    fn spawn(backend: Option<Arc<dyn ChatBackend>>) -> Harness {
        let (ui_tx, ui_rx) = mpsc::channel(32);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let handle = tokio::spawn(run_backend(
            backend,
            "system".to_string(),
            ui_tx,
            cmd_rx,
        ));
        Harness {
            cmd_tx,
            ui_rx,
            handle,
        }
    }

    fn scripted(fragments: Vec<&'static str>, fail: bool) -> Option<Arc<dyn ChatBackend>> {
        Some(Arc::new(ScriptedBackend { fragments, fail }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_reply_and_cancel() {
        let mut h = spawn(None);
        let mut convo = Conversation::start(None);
        let pending = convo.submit("skills").unwrap();

        h.cmd_tx
            .send(BackendCommand::ScheduleReply {
                pending: pending.clone(),
                delay: Duration::from_millis(800),
            })
            .await
            .unwrap();
        match h.ui_rx.recv().await {
            Some(UiEvent::ReplyReady(p)) => assert_eq!(p, pending),
            other => panic!("unexpected event: {:?}", other),
        }

        h.cmd_tx
            .send(BackendCommand::ScheduleReply {
                pending,
                delay: Duration::from_millis(800),
            })
            .await
            .unwrap();
        h.cmd_tx.send(BackendCommand::CancelReplies).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(h.ui_rx.try_recv().is_err());

        h.cmd_tx.send(BackendCommand::Quit).await.unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_init_without_key_is_unavailable() {
        let mut h = spawn(None);
        h.cmd_tx.send(BackendCommand::InitDelegate).await.unwrap();
        assert!(matches!(
            h.ui_rx.recv().await,
            Some(UiEvent::DelegateSession(SessionAvailability::Unavailable))
        ));

        let id = MessageId::next();
        h.cmd_tx
            .send(BackendCommand::DelegateSend {
                id,
                text: "hi".into(),
            })
            .await
            .unwrap();
        assert!(matches!(
            h.ui_rx.recv().await,
            Some(UiEvent::DelegateFailed { id: failed, .. }) if failed == id
        ));
        h.cmd_tx.send(BackendCommand::Quit).await.unwrap();
    }

    #[tokio::test]
    async fn test_delegate_stream_chunks_then_done() {
        let mut h = spawn(scripted(vec!["Vibe", "-Engage", " AI"], false));
        h.cmd_tx.send(BackendCommand::InitDelegate).await.unwrap();
        assert!(matches!(
            h.ui_rx.recv().await,
            Some(UiEvent::DelegateSession(SessionAvailability::Ready))
        ));

        let id = MessageId::next();
        h.cmd_tx
            .send(BackendCommand::DelegateSend {
                id,
                text: "what did he ship?".into(),
            })
            .await
            .unwrap();

        let mut chunks = Vec::new();
        loop {
            match h.ui_rx.recv().await {
                Some(UiEvent::DelegateChunk { id: chunk_id, text }) => {
                    assert_eq!(chunk_id, id);
                    chunks.push(text);
                }
                Some(UiEvent::DelegateDone { id: done_id, text }) => {
                    assert_eq!(done_id, id);
                    assert_eq!(text, "Vibe-Engage AI");
                    break;
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(chunks, vec!["Vibe", "Vibe-Engage", "Vibe-Engage AI"]);

        h.cmd_tx.send(BackendCommand::Quit).await.unwrap();
        h.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_delegate_stream_failure() {
        let mut h = spawn(scripted(vec![], true));
        h.cmd_tx.send(BackendCommand::InitDelegate).await.unwrap();
        let _ = h.ui_rx.recv().await;

        let id = MessageId::next();
        h.cmd_tx
            .send(BackendCommand::DelegateSend {
                id,
                text: "q".into(),
            })
            .await
            .unwrap();
        match h.ui_rx.recv().await {
            Some(UiEvent::DelegateFailed { id: failed, error }) => {
                assert_eq!(failed, id);
                assert!(error.contains("connection reset"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        h.cmd_tx.send(BackendCommand::Quit).await.unwrap();
    }
}
