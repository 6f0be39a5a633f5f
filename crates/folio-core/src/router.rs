//! Keyword intent router.

use crate::panel::{PanelTag, PANEL_ROUTES};

/// Reply text when no keyword group matches.
pub const FALLBACK_REPLY: &str = "Command recognized. I am currently operating in direct-vault mode. You can ask about his projects, experience, patents, or tools.";

/// Canned reply produced by the router or a navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub panel: Option<PanelTag>,
}

impl Reply {
    pub fn new(text: impl Into<String>, panel: Option<PanelTag>) -> Self {
        Self {
            text: text.into(),
            panel,
        }
    }

    /// Reply for a sidebar navigation to `panel`.
    pub fn for_navigation(panel: PanelTag) -> Self {
        Self::new(panel.route().nav_ack, Some(panel))
    }
}

/// Classify free text into a reply.
///
/// Groups are tested in `PANEL_ROUTES` order and the first group with any
/// keyword contained in the lower-cased input wins. Never fails; unmatched
/// input gets the fallback text and no panel.
pub fn route(input: &str) -> Reply {
    let lower = input.to_lowercase();

    PANEL_ROUTES
        .iter()
        .find(|r| r.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|r| Reply::new(r.router_ack, Some(r.panel)))
        .unwrap_or_else(|| Reply::new(FALLBACK_REPLY, None))
}
