//! Delayed delivery of canned replies.
//!
//! Each scheduled reply is a task that sleeps and then sends
//! `UiEvent::ReplyReady`. All tasks share a cancellation generation:
//! `cancel_all` cancels every task scheduled so far and starts a new one.

use std::time::Duration;

use folio_core::PendingReply;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::event::UiEvent;

pub struct ReplyScheduler {
    ui_tx: mpsc::Sender<UiEvent>,
    generation: CancellationToken,
    tracker: TaskTracker,
}

impl ReplyScheduler {
    pub fn new(ui_tx: mpsc::Sender<UiEvent>) -> Self {
        Self {
            ui_tx,
            generation: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Deliver `pending` after `delay` unless cancelled first.
    pub fn schedule(&self, pending: PendingReply, delay: Duration) {
        let token = self.generation.child_token();
        let ui_tx = self.ui_tx.clone();
        debug!(version = pending.version, delay_ms = delay.as_millis() as u64, "Scheduling reply");

        self.tracker.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(version = pending.version, "Scheduled reply cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = ui_tx.send(UiEvent::ReplyReady(pending)).await;
                }
            }
        });
    }

    /// Cancel every reply scheduled so far.
    pub fn cancel_all(&mut self) {
        self.generation.cancel();
        self.generation = CancellationToken::new();
    }

    /// Number of replies still waiting.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Cancel everything and wait for the tasks to exit.
    pub async fn shutdown(&mut self) {
        self.cancel_all();
        self.tracker.close();
        self.tracker.wait().await;
    }
}
