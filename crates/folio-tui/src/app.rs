//! Application state and main event loop.

use std::path::Path;
use std::time::{Duration, Instant};

use folio_core::{ConversationError, PanelTag, SessionAvailability};
use folio_tui_components::{InputOutcome, Theme};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::event::{BackendCommand, UiEvent};
use crate::launcher::{LaunchPhase, LauncherAction};
use crate::render;
use crate::state::{Overlay, Screen, ScrollBounds, SidebarEntry, UiState};
use crate::store::{Avatar, ProfileImageStore};

/// Lines moved per PageUp/PageDown.
const SCROLL_STEP: usize = 5;

/// Main application with UI state and channel handles.
pub struct App {
    /// Current UI state snapshot for rendering.
    state: UiState,

    reply_delay: Duration,
    nav_delay: Duration,

    /// Profile-image override and our subscription to it.
    images: ProfileImageStore,
    avatar_rx: watch::Receiver<Option<String>>,

    theme: Theme,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(
        config: &AppConfig,
        mut state: UiState,
        images: ProfileImageStore,
        ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<BackendCommand>,
    ) -> Self {
        let mut avatar_rx = images.subscribe();
        state.avatar = Avatar::resolve(
            avatar_rx.borrow_and_update().as_deref(),
            &state.profile.profile_image,
            &state.asset_dir,
        );
        if state.launcher.phase == LaunchPhase::Running {
            state.start_chat(state.launcher.selected);
        }
        Self {
            state,
            reply_delay: config.reply_delay,
            nav_delay: config.nav_delay,
            images,
            avatar_rx,
            theme: Theme::default(),
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Receiving updates from the backend
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            self.state.tick = self.state.tick.wrapping_add(1);
            if self.state.launcher.tick(Instant::now()) {
                self.state.start_chat(self.state.launcher.selected);
            }

            // Draw the UI
            let mut bounds = ScrollBounds::default();
            terminal.draw(|frame| bounds = render::render(frame, &self.state, &self.theme))?;
            self.state.set_scroll_bounds(bounds);

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            // Process backend events (non-blocking)
            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }

            self.sync_avatar();
        }

        // Send quit command to backend
        self.send(BackendCommand::Quit);

        Ok(())
    }

    fn send(&self, cmd: BackendCommand) {
        if let Err(e) = self.cmd_tx.blocking_send(cmd) {
            warn!(error = %e, "Backend channel closed");
        }
    }

    /// Pick up a changed profile-image override.
    fn sync_avatar(&mut self) {
        if self.avatar_rx.has_changed().unwrap_or(false) {
            let value = self.avatar_rx.borrow_and_update().clone();
            self.state.avatar = Avatar::resolve(
                value.as_deref(),
                &self.state.profile.profile_image,
                &self.state.asset_dir,
            );
            debug!(avatar = ?self.state.avatar, "Profile image changed");
        }
    }

    /// Apply an event from the backend to the UI state.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ReplyReady(pending) => match self.state.conversation.resolve(pending) {
                Ok(msg) => {
                    debug!(panel = ?msg.panel, "Reply appended");
                    self.state.chat_scroll = 0;
                }
                Err(ConversationError::StaleReply { ticket, current }) => {
                    debug!(ticket, current, "Dropped reply issued before reset");
                }
                Err(e) => warn!(error = %e, "Unexpected reply"),
            },
            UiEvent::DelegateSession(availability) => {
                info!(?availability, "Q&A session initialized");
                self.state.delegate.set_session(availability);
                if availability == SessionAvailability::Unavailable {
                    self.state.status_message =
                        Some("Q&A agent offline (set GEMINI_API_KEY)".to_string());
                }
            }
            UiEvent::DelegateChunk { id, text } => {
                self.state.delegate.apply_chunk(id, &text);
                self.state.delegate_scroll = 0;
            }
            UiEvent::DelegateDone { id, text } => {
                self.state.delegate.apply_chunk(id, &text);
                self.state.delegate.finish(id);
            }
            UiEvent::DelegateFailed { id, error } => {
                warn!(%id, error = %error, "Q&A reply failed");
                self.state.delegate.fail(id);
            }
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.state.screen == Screen::Launcher {
            return self.state.launcher.handle_key(key.code, Instant::now()) == LauncherAction::Quit;
        }

        match self.state.overlay {
            Overlay::QuitConfirm => return self.handle_quit_confirm_key(key.code),
            Overlay::ImageDialog => self.handle_image_dialog_key(key),
            Overlay::Sidebar => self.handle_sidebar_key(key.code),
            Overlay::Delegate => self.handle_delegate_key(key),
            Overlay::None => self.handle_chat_key(key, ctrl),
        }
        false
    }

    fn handle_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Esc => self.state.overlay = Overlay::QuitConfirm,
            KeyCode::Tab => self.state.overlay = Overlay::Sidebar,
            KeyCode::F(2) => self.open_delegate(),
            KeyCode::Char('g') if ctrl => self.open_delegate(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('p') if ctrl => self.open_image_dialog(),
            KeyCode::PageUp => {
                self.state.chat_scroll =
                    (self.state.chat_scroll + SCROLL_STEP).min(self.state.scroll_bounds.chat)
            }
            KeyCode::PageDown => {
                self.state.chat_scroll = self.state.chat_scroll.saturating_sub(SCROLL_STEP)
            }
            _ => {
                if !self.state.conversation.input_enabled() {
                    return;
                }
                if let InputOutcome::Submitted(text) = self.state.chat_input.handle_key(key) {
                    self.submit(&text);
                }
            }
        }
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Tab => self.state.overlay = Overlay::None,
            KeyCode::Up | KeyCode::Char('k') => self.state.sidebar_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.sidebar_next(),
            KeyCode::Enter => {
                self.state.overlay = Overlay::None;
                match self.state.selected_sidebar_entry() {
                    Some(SidebarEntry::Panel(panel)) => self.navigate(panel),
                    Some(SidebarEntry::ProfileImage) => self.open_image_dialog(),
                    Some(SidebarEntry::Reset) => self.reset(),
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn handle_delegate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::F(2) => self.state.overlay = Overlay::None,
            KeyCode::PageUp => {
                self.state.delegate_scroll = (self.state.delegate_scroll + SCROLL_STEP)
                    .min(self.state.scroll_bounds.delegate)
            }
            KeyCode::PageDown => {
                self.state.delegate_scroll = self.state.delegate_scroll.saturating_sub(SCROLL_STEP)
            }
            // Keep the draft until the agent can take it.
            KeyCode::Enter if !self.delegate_accepts_input() => {}
            _ => {
                if let InputOutcome::Submitted(text) = self.state.delegate_input.handle_key(key) {
                    self.send_delegate(&text);
                }
            }
        }
    }

    fn delegate_accepts_input(&self) -> bool {
        self.state.delegate.session() == SessionAvailability::Ready
            && !self.state.delegate.is_loading()
    }

    fn handle_image_dialog_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.overlay = Overlay::None;
            return;
        }
        if let InputOutcome::Submitted(path) = self.state.image_input.handle_key(key) {
            self.apply_image_path(path.trim());
        }
    }

    /// Handle key press in quit confirmation dialog.
    fn handle_quit_confirm_key(&mut self, code: KeyCode) -> bool {
        match code {
            // Confirm quit
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                return true;
            }
            // Cancel quit
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state.overlay = Overlay::None;
            }
            _ => {}
        }
        false
    }

    fn schedule(&self, pending: folio_core::PendingReply, delay: Duration) {
        self.send(BackendCommand::ScheduleReply { pending, delay });
    }

    /// Submit typed text to the conversation.
    fn submit(&mut self, text: &str) {
        match self.state.conversation.submit(text) {
            Ok(pending) => {
                debug!(panel = ?pending.reply.panel, "Message routed");
                self.state.chat_scroll = 0;
                self.schedule(pending, self.reply_delay);
            }
            Err(ConversationError::EmptyInput) => {}
            Err(e) => debug!(error = %e, "Submission rejected"),
        }
    }

    /// Ask for a panel from the sidebar.
    fn navigate(&mut self, panel: PanelTag) {
        match self.state.conversation.navigate(panel) {
            Ok(pending) => {
                self.state.status_message = None;
                self.state.chat_scroll = 0;
                self.schedule(pending, self.nav_delay);
            }
            Err(e) => {
                debug!(%panel, error = %e, "Navigation rejected");
                self.state.status_message = Some("Wait for the current reply".to_string());
            }
        }
    }

    fn reset(&mut self) {
        info!("Session reset");
        self.state.conversation.reset();
        self.state.chat_input.clear();
        self.state.chat_scroll = 0;
        self.state.status_message = None;
        self.send(BackendCommand::CancelReplies);
    }

    fn open_delegate(&mut self) {
        self.state.overlay = Overlay::Delegate;
        if self.state.delegate.session() == SessionAvailability::Unknown {
            self.send(BackendCommand::InitDelegate);
        }
    }

    fn send_delegate(&mut self, text: &str) {
        match self.state.delegate.begin_send(text) {
            Some(id) => {
                self.state.delegate_scroll = 0;
                self.send(BackendCommand::DelegateSend {
                    id,
                    text: text.to_string(),
                });
            }
            None => debug!(
                session = ?self.state.delegate.session(),
                loading = self.state.delegate.is_loading(),
                "Q&A send ignored"
            ),
        }
    }

    fn open_image_dialog(&mut self) {
        self.state.image_input.clear();
        self.state.image_error = None;
        self.state.overlay = Overlay::ImageDialog;
    }

    /// Upload the image at `path`, or clear the override when empty.
    fn apply_image_path(&mut self, path: &str) {
        let result = if path.is_empty() {
            self.images.clear().map_err(|e| e.to_string())
        } else {
            self.images
                .upload(Path::new(path))
                .map_err(|e| e.to_string())
        };
        match result {
            Ok(()) => {
                self.state.overlay = Overlay::None;
                self.state.image_error = None;
                self.sync_avatar();
            }
            Err(e) => {
                warn!(error = %e, "Profile image update failed");
                self.state.image_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::Launcher;
    use folio_core::conversation::RESET_TEXT;
    use folio_core::{MemoryStore, Persona, ProfileData, DELEGATE_FALLBACK_TEXT};
    use std::path::PathBuf;

    struct Harness {
        app: App,
        ui_tx: mpsc::Sender<UiEvent>,
        cmd_rx: mpsc::Receiver<BackendCommand>,
    }

    fn harness() -> Harness {
        let config = AppConfig::default();
        let (ui_tx, ui_rx) = mpsc::channel(32);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let state = UiState::new(
            ProfileData::builtin().unwrap(),
            PathBuf::from("."),
            Launcher::running(Some(Persona::Curious)),
            Avatar::Missing(String::new()),
        );
        let images = ProfileImageStore::open(Box::new(MemoryStore::new())).unwrap();
        Harness {
            app: App::new(&config, state, images, ui_rx, cmd_tx),
            ui_tx,
            cmd_rx,
        }
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn drain_events(h: &mut Harness) {
        while let Ok(event) = h.app.ui_rx.try_recv() {
            h.app.apply_event(event);
        }
    }

    #[test]
    fn test_starts_in_chat_when_persona_given() {
        let h = harness();
        assert_eq!(h.app.state.screen, Screen::Chat);
        assert_eq!(h.app.state.conversation.messages().len(), 2);
    }

    #[test]
    fn test_submit_schedules_routed_reply() {
        let mut h = harness();
        type_line(&mut h.app, "any patent news?");

        match h.cmd_rx.try_recv() {
            Ok(BackendCommand::ScheduleReply { pending, delay }) => {
                assert_eq!(pending.reply.panel, Some(PanelTag::Patents));
                assert_eq!(delay, Duration::from_millis(800));
                h.ui_tx.try_send(UiEvent::ReplyReady(pending)).unwrap();
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!h.app.state.conversation.input_enabled());

        drain_events(&mut h);
        let msgs = h.app.state.conversation.messages();
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[3].panel, Some(PanelTag::Patents));
        assert!(h.app.state.conversation.input_enabled());
    }

    #[test]
    fn test_typing_ignored_while_reply_pending() {
        let mut h = harness();
        type_line(&mut h.app, "skills");
        let _ = h.cmd_rx.try_recv();

        type_line(&mut h.app, "more");
        assert_eq!(h.app.state.chat_input.value(), "");
        assert!(h.cmd_rx.try_recv().is_err());
        assert_eq!(h.app.state.conversation.messages().len(), 3);
    }

    #[test]
    fn test_empty_submit_sends_nothing() {
        let mut h = harness();
        type_line(&mut h.app, "   ");
        assert!(h.cmd_rx.try_recv().is_err());
        assert_eq!(h.app.state.conversation.messages().len(), 2);
    }

    #[test]
    fn test_sidebar_navigation() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Tab);
        assert_eq!(h.app.state.overlay, Overlay::Sidebar);
        // About, Projects, Patents
        press(&mut h.app, KeyCode::Down);
        press(&mut h.app, KeyCode::Down);
        press(&mut h.app, KeyCode::Enter);

        assert_eq!(h.app.state.overlay, Overlay::None);
        let msgs = h.app.state.conversation.messages();
        assert_eq!(msgs[2].text(), "Tell me about your patents.");
        match h.cmd_rx.try_recv() {
            Ok(BackendCommand::ScheduleReply { pending, delay }) => {
                assert_eq!(pending.reply.text, "Accessing Intellectual Property vault.");
                assert_eq!(delay, Duration::from_millis(600));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_reset_cancels_and_drops_stale_reply() {
        let mut h = harness();
        type_line(&mut h.app, "projects");
        let pending = match h.cmd_rx.try_recv() {
            Ok(BackendCommand::ScheduleReply { pending, .. }) => pending,
            other => panic!("unexpected command: {:?}", other),
        };

        ctrl(&mut h.app, 'r');
        assert!(matches!(h.cmd_rx.try_recv(), Ok(BackendCommand::CancelReplies)));
        assert_eq!(h.app.state.conversation.messages()[0].text(), RESET_TEXT);

        // A reply that raced the cancellation must not land.
        h.ui_tx.try_send(UiEvent::ReplyReady(pending)).unwrap();
        drain_events(&mut h);
        assert_eq!(h.app.state.conversation.messages().len(), 2);
    }

    #[test]
    fn test_delegate_flow() {
        let mut h = harness();
        press(&mut h.app, KeyCode::F(2));
        assert_eq!(h.app.state.overlay, Overlay::Delegate);
        assert!(matches!(h.cmd_rx.try_recv(), Ok(BackendCommand::InitDelegate)));

        h.ui_tx
            .try_send(UiEvent::DelegateSession(SessionAvailability::Ready))
            .unwrap();
        drain_events(&mut h);

        type_line(&mut h.app, "what did he ship?");
        let id = match h.cmd_rx.try_recv() {
            Ok(BackendCommand::DelegateSend { id, text }) => {
                assert_eq!(text, "what did he ship?");
                id
            }
            other => panic!("unexpected command: {:?}", other),
        };
        assert!(h.app.state.delegate.is_loading());

        h.ui_tx
            .try_send(UiEvent::DelegateChunk {
                id,
                text: "Vibe".into(),
            })
            .unwrap();
        h.ui_tx
            .try_send(UiEvent::DelegateDone {
                id,
                text: "Vibe-Engage AI".into(),
            })
            .unwrap();
        drain_events(&mut h);

        let last = h.app.state.delegate.messages().last().unwrap();
        assert_eq!(last.text(), "Vibe-Engage AI");
        assert!(!h.app.state.delegate.is_loading());

        // Reopening does not re-initialize.
        press(&mut h.app, KeyCode::Esc);
        press(&mut h.app, KeyCode::F(2));
        assert!(h.cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_delegate_input_locked_while_streaming() {
        let mut h = harness();
        press(&mut h.app, KeyCode::F(2));
        let _ = h.cmd_rx.try_recv();

        // Enter before the session is ready keeps the draft.
        type_line(&mut h.app, "early");
        assert_eq!(h.app.state.delegate_input.value(), "early");
        assert!(h.cmd_rx.try_recv().is_err());

        h.app
            .apply_event(UiEvent::DelegateSession(SessionAvailability::Ready));
        ctrl(&mut h.app, 'u');
        type_line(&mut h.app, "first");
        let id = match h.cmd_rx.try_recv() {
            Ok(BackendCommand::DelegateSend { id, .. }) => id,
            other => panic!("unexpected command: {:?}", other),
        };

        // A second question typed mid-stream is held, not dropped.
        type_line(&mut h.app, "second");
        assert_eq!(h.app.state.delegate_input.value(), "second");
        assert!(h.cmd_rx.try_recv().is_err());
        assert_eq!(h.app.state.delegate.messages().len(), 3);

        h.app.apply_event(UiEvent::DelegateDone {
            id,
            text: "done".into(),
        });
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.state.delegate_input.value(), "");
        assert!(matches!(
            h.cmd_rx.try_recv(),
            Ok(BackendCommand::DelegateSend { text, .. }) if text == "second"
        ));
    }

    #[test]
    fn test_scrolling_stops_at_top() {
        let mut h = harness();
        h.app.state.set_scroll_bounds(ScrollBounds {
            chat: 7,
            delegate: 0,
        });
        press(&mut h.app, KeyCode::PageUp);
        press(&mut h.app, KeyCode::PageUp);
        press(&mut h.app, KeyCode::PageUp);
        assert_eq!(h.app.state.chat_scroll, 7);

        press(&mut h.app, KeyCode::PageDown);
        assert_eq!(h.app.state.chat_scroll, 2);
        press(&mut h.app, KeyCode::PageDown);
        assert_eq!(h.app.state.chat_scroll, 0);
    }

    #[test]
    fn test_delegate_failure_shows_fallback() {
        let mut h = harness();
        press(&mut h.app, KeyCode::F(2));
        let _ = h.cmd_rx.try_recv();
        h.app
            .apply_event(UiEvent::DelegateSession(SessionAvailability::Ready));
        type_line(&mut h.app, "hello");
        let id = match h.cmd_rx.try_recv() {
            Ok(BackendCommand::DelegateSend { id, .. }) => id,
            other => panic!("unexpected command: {:?}", other),
        };
        h.app.apply_event(UiEvent::DelegateFailed {
            id,
            error: "timeout".into(),
        });
        let msgs = h.app.state.delegate.messages();
        assert_eq!(msgs.last().unwrap().text(), DELEGATE_FALLBACK_TEXT);
        assert_eq!(msgs.len(), 3);
    }

    #[test]
    fn test_delegate_without_key_is_noop() {
        let mut h = harness();
        press(&mut h.app, KeyCode::F(2));
        let _ = h.cmd_rx.try_recv();
        h.app
            .apply_event(UiEvent::DelegateSession(SessionAvailability::Unavailable));
        type_line(&mut h.app, "hello");
        assert!(h.cmd_rx.try_recv().is_err());
        assert_eq!(h.app.state.delegate.messages().len(), 1);
        assert!(h.app.state.status_message.is_some());
    }

    #[test]
    fn test_quit_confirmation() {
        let mut h = harness();
        assert!(!press(&mut h.app, KeyCode::Esc));
        assert_eq!(h.app.state.overlay, Overlay::QuitConfirm);
        assert!(!press(&mut h.app, KeyCode::Char('n')));
        assert_eq!(h.app.state.overlay, Overlay::None);
        press(&mut h.app, KeyCode::Esc);
        assert!(press(&mut h.app, KeyCode::Char('y')));
        assert!(ctrl(&mut h.app, 'c'));
    }

    #[test]
    fn test_image_upload_updates_avatar() {
        let mut h = harness();
        let dir = std::env::temp_dir().join(format!("folio-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("me.png");
        std::fs::write(&path, [9u8; 200]).unwrap();

        ctrl(&mut h.app, 'p');
        assert_eq!(h.app.state.overlay, Overlay::ImageDialog);
        type_line(&mut h.app, "nope.bmp");
        assert!(h.app.state.image_error.is_some());
        assert_eq!(h.app.state.overlay, Overlay::ImageDialog);

        type_line(&mut h.app, path.to_str().unwrap());
        assert_eq!(h.app.state.overlay, Overlay::None);
        assert!(matches!(h.app.state.avatar, Avatar::Custom { .. }));

        // Empty path clears the override.
        ctrl(&mut h.app, 'p');
        type_line(&mut h.app, "");
        assert!(matches!(h.app.state.avatar, Avatar::Missing(_)));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
