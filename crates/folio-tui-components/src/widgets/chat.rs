//! Chat widget for displaying conversation messages.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::{typing_dots, wrap_text_indented};

/// Role of a chat message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One line of an attachment, wrapped by the widget.
#[derive(Debug, Clone)]
pub struct AttachmentLine {
    pub text: String,
    pub style: Style,
}

impl AttachmentLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

/// A titled content block shown under a message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub title: String,
    pub lines: Vec<AttachmentLine>,
}

/// A single chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Reply still arriving.
    pub streaming: bool,
    pub attachment: Option<Attachment>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
            streaming: false,
            attachment: None,
        }
    }

    pub fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// Configuration for the chat widget.
#[derive(Debug, Clone)]
pub struct ChatWidget<'a> {
    /// Messages to display.
    messages: &'a [ChatMessage],
    /// Lines scrolled back from the bottom (0 = follow the tail).
    scroll_back: usize,
    /// Animation tick for the typing indicator, if one is shown.
    typing: Option<u64>,
    /// Whether the widget is focused.
    focused: bool,
    /// Title override.
    title: Option<String>,
    /// Speaker labels.
    user_label: &'a str,
    model_label: &'a str,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> ChatWidget<'a> {
    /// Create a new chat widget.
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            scroll_back: 0,
            typing: None,
            focused: false,
            title: None,
            user_label: "You",
            model_label: "Agent",
            theme: Theme::default(),
        }
    }

    /// Scroll back from the newest line.
    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Show the typing indicator, animated by `tick`.
    pub fn typing(mut self, tick: Option<u64>) -> Self {
        self.typing = tick;
        self
    }

    /// Set whether the widget is focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set a custom title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the speaker labels.
    pub fn labels(mut self, user: &'a str, model: &'a str) -> Self {
        self.user_label = user;
        self.model_label = model;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build every display line for a given text width.
    fn build_lines(&self, text_width: usize) -> Vec<Line<'static>> {
        let mut all_lines: Vec<Line<'static>> = Vec::new();

        for msg in self.messages {
            let (label, style) = match msg.role {
                ChatRole::User => (self.user_label, self.theme.user_style()),
                ChatRole::Model => (self.model_label, self.theme.model_style()),
            };

            // Message header
            all_lines.push(Line::from(vec![
                Span::styled(format!("{} ", label), style.add_modifier(Modifier::BOLD)),
                Span::styled(
                    msg.timestamp.format("%H:%M:%S").to_string(),
                    self.theme.muted_style(),
                ),
            ]));

            if msg.streaming && msg.content.is_empty() {
                all_lines.push(Line::from(Span::styled(
                    "  ...",
                    self.theme.muted_style(),
                )));
            } else {
                for wrapped_line in wrap_text_indented(&msg.content, text_width, "  ") {
                    all_lines.push(Line::from(Span::raw(wrapped_line)));
                }
                if msg.streaming {
                    all_lines.push(Line::from(Span::styled(
                        "  (streaming...)",
                        self.theme.muted_style(),
                    )));
                }
            }

            if let Some(attachment) = &msg.attachment {
                all_lines.push(Line::from(Span::styled(
                    format!("  ┌─ {} ", attachment.title),
                    self.theme.panel_title_style(),
                )));
                for line in &attachment.lines {
                    for wrapped in wrap_text_indented(&line.text, text_width, "  │ ") {
                        let (gutter, body) = wrapped.split_at("  │ ".len());
                        all_lines.push(Line::from(vec![
                            Span::styled(gutter.to_string(), self.theme.muted_style()),
                            Span::styled(body.to_string(), line.style),
                        ]));
                    }
                }
                all_lines.push(Line::from(Span::styled("  └─", self.theme.muted_style())));
            }

            // Add blank line between messages
            all_lines.push(Line::from(""));
        }

        if let Some(tick) = self.typing {
            all_lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", self.model_label),
                    self.theme.model_style().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("is typing{}", typing_dots(tick)),
                    self.theme.muted_style().add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        all_lines
    }

    /// Largest useful `scroll_back` when drawn into `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;
        self.build_lines(text_width)
            .len()
            .saturating_sub(visible_height)
    }

    /// Render the widget.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };

        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.build_lines(text_width);
        let total_lines = all_lines.len();

        // Calculate scroll position
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll_offset = max_scroll.saturating_sub(self.scroll_back);

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll_offset)
            .take(visible_height)
            .collect();

        // Build title
        let first_line = if total_lines == 0 { 0 } else { scroll_offset + 1 };
        let last_line = (scroll_offset + visible_height).min(total_lines);
        let title = self
            .title
            .map(|t| format!(" {} [{}-{}/{}] ", t, first_line, last_line, total_lines))
            .unwrap_or_else(|| format!(" Chat [{}-{}/{}] ", first_line, last_line, total_lines));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        frame.render_widget(paragraph, area);
    }
}
