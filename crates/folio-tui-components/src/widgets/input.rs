//! Single-line text input: an editing buffer and the bar that renders it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;

/// Split `value` around a cursor given in characters.
pub(crate) fn split_at_cursor(value: &str, cursor: usize) -> (String, String) {
    let cursor = cursor.min(value.chars().count());
    let before: String = value.chars().take(cursor).collect();
    let after: String = value.chars().skip(cursor).collect();
    (before, after)
}

/// Outcome of feeding a key to an [`InputBar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The key edited the buffer or moved the cursor.
    Edited,
    /// Enter was pressed; carries the submitted text and clears the buffer.
    Submitted(String),
    /// The key is not an editing key.
    Ignored,
}

/// Editable single-line input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct InputBar {
    value: String,
    cursor: usize,
}

impl InputBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        let len = self.value.chars().count();
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.value);
                self.cursor = 0;
                InputOutcome::Submitted(text)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                InputOutcome::Edited
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                InputOutcome::Edited
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                InputOutcome::Edited
            }
            KeyCode::Delete => {
                if self.cursor < len {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                InputOutcome::Edited
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Edited
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                InputOutcome::Edited
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Edited
            }
            KeyCode::End => {
                self.cursor = len;
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Render as a bordered one-line box.
    ///
    /// A disabled bar shows `disabled_hint` instead of the buffer.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        placeholder: &str,
        disabled_hint: Option<&str>,
        focused: bool,
        theme: &Theme,
    ) {
        let line = if let Some(hint) = disabled_hint {
            Line::from(Span::styled(
                hint.to_string(),
                theme.muted_style().add_modifier(Modifier::ITALIC),
            ))
        } else if self.value.is_empty() && !focused {
            Line::from(Span::styled(placeholder.to_string(), theme.muted_style()))
        } else if focused {
            let (before, after) = split_at_cursor(&self.value, self.cursor);
            let mut spans = vec![Span::styled("> ", theme.accent_style()), Span::raw(before)];
            spans.push(Span::styled("|", theme.accent_style()));
            if self.value.is_empty() {
                spans.push(Span::styled(placeholder.to_string(), theme.muted_style()));
            } else {
                spans.push(Span::raw(after));
            }
            Line::from(spans)
        } else {
            Line::from(Span::raw(self.value.clone()))
        };

        let border = if focused && disabled_hint.is_none() {
            theme.focused_border()
        } else {
            theme.unfocused_border()
        };
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        );
        frame.render_widget(paragraph, area);
    }
}
