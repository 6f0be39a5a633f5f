//! Theme and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the Folio TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (highlights, active elements)
    pub accent: Color,
    /// Success color (ready, connected)
    pub success: Color,
    /// Warning color (pending, launching)
    pub warning: Color,
    /// Error color (unavailable, failed)
    pub error: Color,
    /// Muted color (timestamps, secondary info)
    pub muted: Color,
    /// User message color
    pub user: Color,
    /// Agent message color
    pub model: Color,
    /// Panel heading color
    pub panel: Color,
    /// Background of the selected menu row
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::LightMagenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            user: Color::Cyan,
            model: Color::LightMagenta,
            panel: Color::LightBlue,
            selection: Color::Rgb(60, 40, 90),
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success text.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for warning text.
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for bold text.
    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Bold accent, for titles and key hints.
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for user messages.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user)
    }

    /// Style for agent messages.
    pub fn model_style(&self) -> Style {
        Style::default().fg(self.model)
    }

    /// Style for panel headings inside the chat.
    pub fn panel_title_style(&self) -> Style {
        Style::default().fg(self.panel).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row of a menu.
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}
