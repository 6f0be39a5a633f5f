//! Vertical selection menu.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::theme::Theme;

/// One selectable row.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Main label.
    pub label: String,
    /// Dimmed text after the label.
    pub hint: Option<String>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hint: None,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Bordered list with one highlighted row.
#[derive(Debug)]
pub struct MenuList<'a> {
    /// Menu title.
    title: &'a str,
    /// Rows.
    items: &'a [MenuItem],
    /// Currently selected row index.
    selected: Option<usize>,
    /// Row already chosen (marked even when not highlighted).
    marked: Option<usize>,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> MenuList<'a> {
    pub fn new(title: &'a str, items: &'a [MenuItem]) -> Self {
        Self {
            title,
            items,
            selected: None,
            marked: None,
            theme: Theme::default(),
        }
    }

    /// Set the highlighted row.
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    /// Set the marked row.
    pub fn marked(mut self, index: Option<usize>) -> Self {
        self.marked = index;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the menu.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if self.marked == Some(i) { "● " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, self.theme.accent_style()),
                    Span::raw(item.label.clone()),
                ];
                if let Some(hint) = &item.hint {
                    spans.push(Span::styled(format!("  {}", hint), self.theme.muted_style()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(rows)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border()),
            )
            .highlight_style(self.theme.selection_style())
            .highlight_symbol("▶ ");

        // Render with state for selection
        let mut state = ListState::default();
        if let Some(selected) = self.selected {
            if !self.items.is_empty() {
                state.select(Some(selected.min(self.items.len() - 1)));
            }
        }

        frame.render_stateful_widget(list, area, &mut state);
    }
}
