//! UI state for rendering.

use std::path::PathBuf;

use folio_core::{Conversation, DelegateLog, PanelTag, Persona, ProfileData, SIDEBAR_ORDER};
use folio_tui_components::InputBar;

use crate::launcher::Launcher;
use crate::store::Avatar;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Launcher,
    Chat,
}

/// Layer drawn above the chat, which also receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Sidebar,
    Delegate,
    ImageDialog,
    QuitConfirm,
}

/// One row of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Panel(PanelTag),
    ProfileImage,
    Reset,
}

impl SidebarEntry {
    /// Panels in menu order, then the utility entries.
    pub fn all() -> Vec<SidebarEntry> {
        SIDEBAR_ORDER
            .iter()
            .map(|p| SidebarEntry::Panel(*p))
            .chain([SidebarEntry::ProfileImage, SidebarEntry::Reset])
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SidebarEntry::Panel(panel) => panel.route().menu_label,
            SidebarEntry::ProfileImage => "Set profile image",
            SidebarEntry::Reset => "Reset session",
        }
    }
}

/// Scroll limits of the two chat views, as of the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBounds {
    pub chat: usize,
    pub delegate: usize,
}

/// Everything the renderer needs (no async, no locks).
pub struct UiState {
    pub screen: Screen,
    pub launcher: Launcher,
    pub persona: Option<Persona>,
    pub profile: ProfileData,
    /// Directory relative profile image paths resolve against.
    pub asset_dir: PathBuf,

    pub conversation: Conversation,
    pub chat_input: InputBar,
    pub chat_scroll: usize,
    pub scroll_bounds: ScrollBounds,

    pub delegate: DelegateLog,
    pub delegate_input: InputBar,
    pub delegate_scroll: usize,

    pub overlay: Overlay,
    pub sidebar_entries: Vec<SidebarEntry>,
    pub sidebar_index: usize,

    pub image_input: InputBar,
    pub image_error: Option<String>,
    pub avatar: Avatar,

    /// Animation counter, bumped every loop iteration.
    pub tick: u64,
    /// Status message to display in footer.
    pub status_message: Option<String>,
}

impl UiState {
    pub fn new(profile: ProfileData, asset_dir: PathBuf, launcher: Launcher, avatar: Avatar) -> Self {
        Self {
            screen: Screen::Launcher,
            launcher,
            persona: None,
            profile,
            asset_dir,
            conversation: Conversation::new(),
            chat_input: InputBar::new(),
            chat_scroll: 0,
            scroll_bounds: ScrollBounds::default(),
            delegate: DelegateLog::new(),
            delegate_input: InputBar::new(),
            delegate_scroll: 0,
            overlay: Overlay::None,
            sidebar_entries: SidebarEntry::all(),
            sidebar_index: 0,
            image_input: InputBar::new(),
            image_error: None,
            avatar,
            tick: 0,
            status_message: None,
        }
    }

    /// Enter the chat with the greeting for `persona`.
    pub fn start_chat(&mut self, persona: Option<Persona>) {
        self.persona = persona;
        self.conversation = Conversation::start(persona);
        self.screen = Screen::Chat;
        self.chat_scroll = 0;
    }

    /// Record new limits and pull both offsets back inside them.
    pub fn set_scroll_bounds(&mut self, bounds: ScrollBounds) {
        self.scroll_bounds = bounds;
        self.chat_scroll = self.chat_scroll.min(bounds.chat);
        self.delegate_scroll = self.delegate_scroll.min(bounds.delegate);
    }

    pub fn selected_sidebar_entry(&self) -> Option<SidebarEntry> {
        self.sidebar_entries.get(self.sidebar_index).copied()
    }

    pub fn sidebar_prev(&mut self) {
        let len = self.sidebar_entries.len();
        self.sidebar_index = (self.sidebar_index + len - 1) % len;
    }

    pub fn sidebar_next(&mut self) {
        self.sidebar_index = (self.sidebar_index + 1) % self.sidebar_entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> UiState {
        UiState::new(
            ProfileData::builtin().unwrap(),
            PathBuf::from("."),
            Launcher::new(Duration::ZERO),
            Avatar::Missing("x".into()),
        )
    }

    #[test]
    fn test_sidebar_order() {
        let entries = SidebarEntry::all();
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[0], SidebarEntry::Panel(PanelTag::About));
        assert_eq!(entries[11], SidebarEntry::Panel(PanelTag::Contact));
        assert_eq!(entries[13], SidebarEntry::Reset);
        assert_eq!(entries[10].label(), "What is his background?");
    }

    #[test]
    fn test_sidebar_wraps() {
        let mut state = state();
        state.sidebar_prev();
        assert_eq!(state.selected_sidebar_entry(), Some(SidebarEntry::Reset));
        state.sidebar_next();
        assert_eq!(
            state.selected_sidebar_entry(),
            Some(SidebarEntry::Panel(PanelTag::About))
        );
    }

    #[test]
    fn test_scroll_bounds_clamp_offsets() {
        let mut state = state();
        state.chat_scroll = 12;
        state.delegate_scroll = 4;
        state.set_scroll_bounds(ScrollBounds {
            chat: 7,
            delegate: 10,
        });
        assert_eq!(state.chat_scroll, 7);
        assert_eq!(state.delegate_scroll, 4);
    }

    #[test]
    fn test_start_chat_seeds_greeting() {
        let mut state = state();
        state.start_chat(Some(Persona::Investor));
        assert_eq!(state.screen, Screen::Chat);
        assert_eq!(state.conversation.messages().len(), 2);
    }
}
