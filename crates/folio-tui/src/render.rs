//! UI rendering for the portfolio chat.

use folio_core::{ConversationPhase, Message, Role, SessionAvailability};
use folio_tui_components::{
    centered_rect, truncate, ChatMessage, ChatRole, ChatWidget, ConfirmDialog, Footer, Header,
    HeaderStat, InputDialog, MenuItem, MenuList, StatusIndicator, Theme,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Clear;
use ratatui::Frame;

use crate::launcher::render_launcher;
use crate::panels;
use crate::state::{Overlay, ScrollBounds, Screen, UiState};

const USER_LABEL: &str = "You";
const AGENT_LABEL: &str = "Vibe Agent";

/// Main render function.
///
/// Returns how far each chat view can scroll back at the current size.
pub fn render(frame: &mut Frame, state: &UiState, theme: &Theme) -> ScrollBounds {
    if state.screen == Screen::Launcher {
        render_launcher(
            frame,
            &state.launcher,
            &state.profile.identity.name,
            &state.avatar,
            theme,
        );
        return ScrollBounds::default();
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Conversation
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, theme);
    let mut bounds = ScrollBounds {
        chat: render_conversation(frame, chunks[1], state, theme),
        delegate: 0,
    };
    render_input(frame, chunks[2], state, theme);
    render_footer(frame, chunks[3], state, theme);

    match state.overlay {
        Overlay::None => {}
        Overlay::Sidebar => render_sidebar(frame, state, theme),
        Overlay::Delegate => bounds.delegate = render_delegate(frame, state, theme),
        Overlay::ImageDialog => {
            InputDialog::new(
                "Profile Image",
                "Path to an image file (empty clears the override):",
                state.image_input.value(),
            )
            .cursor(state.image_input.cursor())
            .error(state.image_error.as_deref())
            .width(64)
            .theme(theme.clone())
            .render(frame);
        }
        Overlay::QuitConfirm => {
            ConfirmDialog::new("Quit", "Leave the portfolio?")
                .secondary("The conversation is not saved.")
                .theme(theme.clone())
                .render(frame);
        }
    }

    bounds
}

fn render_header(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let subtitle = state
        .persona
        .map(|p| p.label())
        .unwrap_or(state.profile.identity.name.as_str());
    let status = match state.delegate.session() {
        SessionAvailability::Unknown => StatusIndicator::new("Q&A idle", theme.muted),
        SessionAvailability::Ready if state.delegate.is_loading() => {
            StatusIndicator::warning("Q&A thinking")
        }
        SessionAvailability::Ready => StatusIndicator::success("Q&A online"),
        SessionAvailability::Unavailable => StatusIndicator::error("Q&A offline"),
    };

    Header::new("FOLIO")
        .subtitle(subtitle)
        .status(status)
        .stat(HeaderStat::new(
            "Messages",
            state.conversation.messages().len().to_string(),
        ))
        .theme(theme.clone())
        .render(frame, area);
}

/// Convert log messages for the chat widget, attaching panel content.
fn chat_messages(messages: &[Message], state: &UiState, theme: &Theme) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => ChatRole::User,
                Role::Model => ChatRole::Model,
            };
            let attachment = m
                .panel
                .map(|panel| panels::attachment(panel, &state.profile, &state.avatar, theme));
            ChatMessage::new(role, m.text(), m.created_at)
                .streaming(m.is_streaming)
                .attachment(attachment)
        })
        .collect()
}

fn render_conversation(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) -> usize {
    let messages = chat_messages(state.conversation.messages(), state, theme);
    let typing = (state.conversation.phase() == ConversationPhase::AwaitingReply)
        .then_some(state.tick);

    let widget = ChatWidget::new(&messages)
        .title("Conversation")
        .labels(USER_LABEL, AGENT_LABEL)
        .scroll_back(state.chat_scroll)
        .typing(typing)
        .focused(state.overlay == Overlay::None)
        .theme(theme.clone());
    let max_scroll = widget.max_scroll(area);
    widget.render(frame, area);
    max_scroll
}

fn render_input(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let disabled = (!state.conversation.input_enabled()).then_some("Vibe Agent is typing...");
    state.chat_input.render(
        frame,
        area,
        "Ask about projects, patents, skills...",
        disabled,
        state.overlay == Overlay::None,
        theme,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let hints: &[(&str, &str)] = match state.overlay {
        Overlay::Sidebar => &[("↑↓", "move"), ("Enter", "open"), ("Esc", "close")],
        Overlay::Delegate => &[("Enter", "ask"), ("PgUp/PgDn", "scroll"), ("Esc", "close")],
        Overlay::ImageDialog => &[("Enter", "apply"), ("Esc", "cancel")],
        Overlay::QuitConfirm => &[("y", "quit"), ("n", "stay")],
        Overlay::None => &[
            ("Enter", "send"),
            ("Tab", "menu"),
            ("F2", "ask agent"),
            ("Ctrl+R", "reset"),
            ("Esc", "quit"),
        ],
    };

    Footer::new(hints)
        .status(state.status_message.as_deref())
        .theme(theme.clone())
        .render(frame, area);
}

fn render_sidebar(frame: &mut Frame, state: &UiState, theme: &Theme) {
    let area = frame.area();
    let width = 40.min(area.width);
    let sidebar = Rect::new(area.x, area.y, width, area.height);

    // Borders, highlight symbol and marker take six columns.
    let label_width = width.saturating_sub(6) as usize;
    let items: Vec<MenuItem> = state
        .sidebar_entries
        .iter()
        .map(|e| MenuItem::new(truncate(e.label(), label_width)))
        .collect();

    frame.render_widget(Clear, sidebar);
    MenuList::new("Explore", &items)
        .selected(state.sidebar_index)
        .theme(theme.clone())
        .render(frame, sidebar);
}

fn render_delegate(frame: &mut Frame, state: &UiState, theme: &Theme) -> usize {
    let area = frame.area();
    let popup = centered_rect(
        area.width.saturating_sub(8).min(90),
        area.height.saturating_sub(4),
        area,
    );
    frame.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(popup);

    let messages = chat_messages(state.delegate.messages(), state, theme);
    let widget = ChatWidget::new(&messages)
        .title("Ask the Vibe Agent")
        .labels(USER_LABEL, AGENT_LABEL)
        .scroll_back(state.delegate_scroll)
        .focused(true)
        .theme(theme.clone());
    let max_scroll = widget.max_scroll(chunks[0]);
    widget.render(frame, chunks[0]);

    let hint = match state.delegate.session() {
        SessionAvailability::Unavailable => Some("Q&A agent offline (set GEMINI_API_KEY)"),
        SessionAvailability::Unknown => Some("Connecting..."),
        SessionAvailability::Ready if state.delegate.is_loading() => Some("Thinking..."),
        SessionAvailability::Ready => None,
    };
    // A held draft stays visible over the status hint.
    let hint = hint.filter(|_| state.delegate_input.value().is_empty());
    state
        .delegate_input
        .render(frame, chunks[1], "Ask anything about Gobinath", hint, true, theme);
    max_scroll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::Launcher;
    use crate::store::Avatar;
    use folio_core::{PanelTag, Persona, ProfileData};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use std::time::Duration;

    fn chat_state() -> UiState {
        let mut state = UiState::new(
            ProfileData::builtin().unwrap(),
            PathBuf::from("."),
            Launcher::new(Duration::ZERO),
            Avatar::Missing("assets/profile.jpg".into()),
        );
        state.start_chat(Some(Persona::Investor));
        state
    }

    fn draw_sized(state: &UiState, width: u16, height: u16) -> (Buffer, ScrollBounds) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut bounds = ScrollBounds::default();
        terminal
            .draw(|frame| bounds = render(frame, state, &Theme::default()))
            .unwrap();
        (terminal.backend().buffer().clone(), bounds)
    }

    fn draw(state: &UiState) -> Buffer {
        draw_sized(state, 100, 40).0
    }

    fn contains(buffer: &Buffer, needle: &str) -> bool {
        let area = buffer.area;
        (area.top()..area.bottom()).any(|y| {
            let row: String = (area.left()..area.right())
                .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol()))
                .collect();
            row.contains(needle)
        })
    }

    #[test]
    fn test_launcher_screen() {
        let state = UiState::new(
            ProfileData::builtin().unwrap(),
            PathBuf::from("."),
            Launcher::new(Duration::ZERO),
            Avatar::Missing("x".into()),
        );
        let buffer = draw(&state);
        assert!(contains(&buffer, "Who is visiting?"));
        assert!(contains(&buffer, "Launch"));
    }

    #[test]
    fn test_chat_screen_shows_greeting_and_panel() {
        let state = chat_state();
        let buffer = draw(&state);
        assert!(contains(&buffer, "FOLIO"));
        assert!(contains(&buffer, "Investor access granted."));
        assert!(contains(&buffer, &state.profile.identity.name));
    }

    #[test]
    fn test_pending_reply_disables_input() {
        let mut state = chat_state();
        state.conversation.navigate(PanelTag::Tools).unwrap();
        let buffer = draw(&state);
        assert!(contains(&buffer, "Vibe Agent is typing..."));
    }

    #[test]
    fn test_overlays_render() {
        let mut state = chat_state();
        state.overlay = Overlay::Sidebar;
        assert!(contains(&draw(&state), "Explore"));

        state.overlay = Overlay::Delegate;
        assert!(contains(&draw(&state), "Ask the Vibe Agent"));

        state.overlay = Overlay::QuitConfirm;
        assert!(contains(&draw(&state), "Leave the portfolio?"));
    }

    #[test]
    fn test_scroll_bounds_follow_log_length() {
        let mut state = chat_state();
        assert_eq!(draw_sized(&state, 100, 40).1.chat, 0);

        for _ in 0..6 {
            let pending = state.conversation.navigate(PanelTag::Projects).unwrap();
            state.conversation.resolve(pending).unwrap();
        }
        let (_, bounds) = draw_sized(&state, 100, 40);
        assert!(bounds.chat > 0);
        assert_eq!(bounds.delegate, 0);
    }

    #[test]
    fn test_narrow_sidebar_truncates_labels() {
        let mut state = chat_state();
        state.overlay = Overlay::Sidebar;
        let (buffer, _) = draw_sized(&state, 30, 40);
        assert!(contains(&buffer, "Favorite Tools: Claud..."));
        assert!(!contains(&buffer, "Favorite Tools: Claude, Cursor"));
    }

    #[test]
    fn test_delegate_draft_visible_while_thinking() {
        let mut state = chat_state();
        state.overlay = Overlay::Delegate;
        state.delegate.set_session(SessionAvailability::Ready);
        state.delegate.begin_send("first").unwrap();
        assert!(contains(&draw(&state), "Thinking..."));

        for c in "next one".chars() {
            state
                .delegate_input
                .handle_key(ratatui::crossterm::event::KeyEvent::from(
                    ratatui::crossterm::event::KeyCode::Char(c),
                ));
        }
        let buffer = draw(&state);
        assert!(contains(&buffer, "next one"));
        assert!(!contains(&buffer, "Thinking..."));
    }
}
