//! Shared TUI components for Folio.
//!
//! This crate provides reusable UI components, widgets, and utilities
//! for the Folio terminal portfolio.
//!
//! # Architecture
//!
//! The crate is organized into:
//! - `widgets` - Reusable ratatui widgets (header, footer, chat, menu, input, dialogs)
//! - `theme` - Colors, styles, and visual constants
//! - `utils` - Text wrapping and truncation
//!
//! # Usage
//!
//! Components are designed to be data-agnostic. Pass data through simple
//! structs rather than depending on domain types.

pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;
pub use utils::{truncate, typing_dots, wrap_text_indented};
pub use widgets::chat::{Attachment, AttachmentLine, ChatMessage, ChatRole, ChatWidget};
pub use widgets::dialogs::{centered_rect, ConfirmDialog, InputDialog};
pub use widgets::footer::Footer;
pub use widgets::header::{Header, HeaderStat, StatusIndicator};
pub use widgets::input::{InputBar, InputOutcome};
pub use widgets::menu::{MenuItem, MenuList};
