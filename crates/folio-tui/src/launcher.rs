//! Launcher screen: pick a persona, then launch the chat.

use std::time::{Duration, Instant};

use folio_core::Persona;
use folio_tui_components::{centered_rect, MenuItem, MenuList, Theme};
use ratatui::crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;
use tracing::info;

use crate::store::Avatar;

/// Launcher lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    /// Persona picker.
    Desktop,
    /// Launch transition in progress.
    Launching { started: Instant },
    /// Chat is running.
    Running,
}

/// What a key press on the launcher asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherAction {
    None,
    Quit,
}

/// Index of the "Launch" row, after the personas.
const LAUNCH_ROW: usize = Persona::ALL.len();

#[derive(Debug)]
pub struct Launcher {
    /// Highlighted row (personas, then Launch).
    pub cursor: usize,
    /// Chosen persona.
    pub selected: Option<Persona>,
    pub phase: LaunchPhase,
    delay: Duration,
}

impl Launcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            cursor: 0,
            selected: None,
            phase: LaunchPhase::Desktop,
            delay,
        }
    }

    /// Start already running with `persona` (launcher skipped).
    pub fn running(persona: Option<Persona>) -> Self {
        Self {
            cursor: LAUNCH_ROW,
            selected: persona,
            phase: LaunchPhase::Running,
            delay: Duration::ZERO,
        }
    }

    /// Choose a persona.
    pub fn select(&mut self, persona: Persona) {
        self.selected = Some(persona);
        self.cursor = LAUNCH_ROW;
    }

    /// Begin the launch transition. Ignored until a persona is chosen.
    pub fn launch(&mut self, now: Instant) -> bool {
        if self.phase != LaunchPhase::Desktop || self.selected.is_none() {
            return false;
        }
        info!(persona = ?self.selected, "Launching");
        self.phase = LaunchPhase::Launching { started: now };
        true
    }

    /// Advance the transition. Returns true exactly once, when it completes.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let LaunchPhase::Launching { started } = self.phase {
            if now.duration_since(started) >= self.delay {
                self.phase = LaunchPhase::Running;
                return true;
            }
        }
        false
    }

    /// Fraction of the transition elapsed, 0.0 to 1.0.
    pub fn progress(&self, now: Instant) -> f64 {
        match self.phase {
            LaunchPhase::Desktop => 0.0,
            LaunchPhase::Running => 1.0,
            LaunchPhase::Launching { started } => {
                if self.delay.is_zero() {
                    return 1.0;
                }
                (now.duration_since(started).as_secs_f64() / self.delay.as_secs_f64()).min(1.0)
            }
        }
    }

    /// Handle a key press on the desktop.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> LauncherAction {
        if self.phase != LaunchPhase::Desktop {
            return LauncherAction::None;
        }
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return LauncherAction::Quit,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(LAUNCH_ROW);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.cursor = (self.cursor + 1) % (LAUNCH_ROW + 1);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select(Persona::ALL[index]);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.cursor == LAUNCH_ROW {
                    self.launch(now);
                } else {
                    self.select(Persona::ALL[self.cursor]);
                }
            }
            _ => {}
        }
        LauncherAction::None
    }
}

fn persona_hint(persona: Persona) -> &'static str {
    match persona {
        Persona::Investor => "roadmap, traction, patents",
        Persona::Researcher => "publications, lab work",
        Persona::Collaborator => "stack, projects, tools",
        Persona::Curious => "the quick tour",
    }
}

/// Render the launcher screen.
pub fn render_launcher(
    frame: &mut Frame,
    launcher: &Launcher,
    name: &str,
    avatar: &Avatar,
    theme: &Theme,
) {
    let area = frame.area();
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = 17.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border())
        .title(" FOLIO ")
        .title_style(theme.accent_style());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Identity + avatar
            Constraint::Length(6), // Persona menu
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Launch button / gauge
            Constraint::Min(0),    // Help text
        ])
        .split(inner);

    let identity = Paragraph::new(vec![
        Line::from(Span::styled(name.to_string(), theme.bold())),
        Line::from(Span::styled(avatar.describe(), theme.muted_style())),
        Line::from(Span::styled("Who is visiting?", theme.muted_style())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(identity, chunks[0]);

    let items: Vec<MenuItem> = Persona::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| MenuItem::new(format!("{} {}", i + 1, p.label())).hint(persona_hint(*p)))
        .collect();
    let marked = launcher
        .selected
        .and_then(|s| Persona::ALL.iter().position(|p| *p == s));
    let mut menu = MenuList::new("Persona", &items)
        .marked(marked)
        .theme(theme.clone());
    if launcher.cursor < LAUNCH_ROW {
        menu = menu.selected(launcher.cursor);
    }
    menu.render(frame, chunks[1]);

    match launcher.phase {
        LaunchPhase::Launching { .. } => {
            let gauge = Gauge::default()
                .gauge_style(theme.model_style())
                .label("Synchronizing...")
                .ratio(launcher.progress(Instant::now()));
            frame.render_widget(gauge, chunks[3]);
        }
        _ => {
            let focused = launcher.cursor == LAUNCH_ROW;
            let enabled = launcher.selected.is_some();
            let style = if focused && enabled {
                theme.selection_style()
            } else if enabled {
                theme.accent_style()
            } else {
                theme.muted_style()
            };
            let text = if focused { "▶ Launch" } else { "  Launch" };
            let button = Paragraph::new(text)
                .style(style.add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            frame.render_widget(button, chunks[3]);
        }
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled("↑↓", theme.accent_style()),
        Span::raw(" move  "),
        Span::styled("Enter", theme.accent_style()),
        Span::raw(" choose  "),
        Span::styled("Esc", theme.accent_style()),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center)
    .style(theme.muted_style());
    if chunks[4].height > 0 {
        frame.render_widget(help, chunks[4]);
    }
}
