//! Dialog widgets for confirmations and inputs.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::widgets::input::split_at_cursor;

/// Create a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// A simple confirmation dialog.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<'a> {
    /// Dialog title.
    title: &'a str,
    /// Main message.
    message: &'a str,
    /// Optional secondary message.
    secondary: Option<&'a str>,
    /// Width of the dialog.
    width: u16,
    /// Height of the dialog.
    height: u16,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Create a new confirmation dialog.
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            secondary: None,
            width: 44,
            height: 7,
            theme: Theme::default(),
        }
    }

    /// Set a secondary message.
    pub fn secondary(mut self, message: &'a str) -> Self {
        self.secondary = Some(message);
        self.height = 9;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the dialog.
    pub fn render(self, frame: &mut Frame) {
        let area = centered_rect(self.width, self.height, frame.area());

        frame.render_widget(Clear, area);

        let mut lines = vec![Line::from(""), Line::from(self.message)];

        if let Some(secondary) = self.secondary {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(secondary, self.theme.muted_style())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("es  "),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("o"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border()),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

/// A text input dialog.
#[derive(Debug, Clone)]
pub struct InputDialog<'a> {
    /// Dialog title.
    title: &'a str,
    /// Prompt message.
    prompt: &'a str,
    /// Current input value.
    value: &'a str,
    /// Cursor position.
    cursor: usize,
    /// Error shown under the input, if any.
    error: Option<&'a str>,
    /// Width of the dialog.
    width: u16,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> InputDialog<'a> {
    /// Create a new input dialog.
    pub fn new(title: &'a str, prompt: &'a str, value: &'a str) -> Self {
        Self {
            title,
            prompt,
            value,
            cursor: value.chars().count(),
            error: None,
            width: 64,
            theme: Theme::default(),
        }
    }

    /// Set the cursor position.
    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// Show an error line.
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Set the dialog width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the dialog.
    pub fn render(self, frame: &mut Frame) {
        let height = if self.error.is_some() { 8 } else { 7 };
        let area = centered_rect(self.width, height, frame.area());

        frame.render_widget(Clear, area);

        // Build input line with cursor
        let (before, after) = split_at_cursor(self.value, self.cursor);
        let input_display = format!("  {}|{}", before, after);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", self.prompt),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                input_display,
                Style::default().fg(Color::White),
            )),
        ];
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                self.theme.error_style(),
            )));
        }
        lines.push(Line::from(Span::styled(
            "  [Enter] Submit  [Esc] Cancel",
            self.theme.muted_style(),
        )));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.focused_border())
                .title(format!(" {} ", self.title)),
        );

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(40, 10, area), Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 20, 6);
        let rect = centered_rect(40, 10, area);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (5, 5, 20, 6));
    }
}
