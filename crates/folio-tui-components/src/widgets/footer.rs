//! Footer widget with key hints and an optional status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme::Theme;

/// Footer widget: `key action` pairs, then a status message.
#[derive(Debug, Clone)]
pub struct Footer<'a> {
    /// Key hints as (key, action) pairs.
    hints: &'a [(&'a str, &'a str)],
    /// Status message shown after the hints.
    status: Option<&'a str>,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> Footer<'a> {
    /// Create a new footer with key hints.
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            hints,
            status: None,
            theme: Theme::default(),
        }
    }

    /// Set the status message.
    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the footer.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in self.hints {
            spans.push(Span::styled(*key, self.theme.accent_style()));
            spans.push(Span::styled(format!(" {}  ", action), self.theme.muted_style()));
        }
        if let Some(status) = self.status {
            spans.push(Span::styled("| ", self.theme.muted_style()));
            spans.push(Span::styled(status, self.theme.warning_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
