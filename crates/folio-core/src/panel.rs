//! Content panels and the routing table that leads to them.
//!
//! `PANEL_ROUTES` is the single source of truth for both the keyword router
//! and the sidebar navigation: every panel carries its keyword set, the
//! acknowledgement the router uses, and the fixed prompt/acknowledgement pair
//! a navigation action synthesizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifies which static content block a reply renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelTag {
    About,
    Projects,
    Experience,
    Skills,
    Publications,
    Contact,
    Education,
    Media,
    Gallery,
    Patents,
    Learning,
    Tools,
}

impl PanelTag {
    /// Every panel, in declaration order.
    pub const ALL: [PanelTag; 12] = [
        PanelTag::About,
        PanelTag::Projects,
        PanelTag::Experience,
        PanelTag::Skills,
        PanelTag::Publications,
        PanelTag::Contact,
        PanelTag::Education,
        PanelTag::Media,
        PanelTag::Gallery,
        PanelTag::Patents,
        PanelTag::Learning,
        PanelTag::Tools,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PanelTag::About => "About",
            PanelTag::Projects => "Projects",
            PanelTag::Experience => "Experience",
            PanelTag::Skills => "Skills",
            PanelTag::Publications => "Publications",
            PanelTag::Contact => "Contact",
            PanelTag::Education => "Education",
            PanelTag::Media => "Media",
            PanelTag::Gallery => "Gallery",
            PanelTag::Patents => "Patents",
            PanelTag::Learning => "Learning",
            PanelTag::Tools => "Tools",
        }
    }

    /// The routing entry for this panel.
    pub fn route(&self) -> &'static PanelRoute {
        PANEL_ROUTES
            .iter()
            .find(|r| r.panel == *self)
            .unwrap_or(&PANEL_ROUTES[0])
    }
}

impl fmt::Display for PanelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PanelTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelTag::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPanel(s.to_string()))
    }
}

/// One row of the routing table.
#[derive(Debug)]
pub struct PanelRoute {
    /// Target panel.
    pub panel: PanelTag,
    /// Lower-case substrings that select this panel.
    pub keywords: &'static [&'static str],
    /// Reply text when the router picks this panel.
    pub router_ack: &'static str,
    /// User message synthesized by a navigation action.
    pub nav_prompt: &'static str,
    /// Reply text for a navigation action.
    pub nav_ack: &'static str,
    /// Sidebar entry label.
    pub menu_label: &'static str,
}

/// Router order: the first row with a matching keyword wins.
pub const PANEL_ROUTES: [PanelRoute; 12] = [
    PanelRoute {
        panel: PanelTag::Projects,
        keywords: &["project"],
        router_ack: "Retrieving the product and project matrix from Gobinath's archives.",
        nav_prompt: "Show me the projects.",
        nav_ack: "Check out the product and project matrix.",
        menu_label: "What has been built?",
    },
    PanelRoute {
        panel: PanelTag::Patents,
        keywords: &["patent"],
        router_ack: "Decrypting Intellectual Property records. Accessing patent data.",
        nav_prompt: "Tell me about your patents.",
        nav_ack: "Accessing Intellectual Property vault.",
        menu_label: "What patents are filed?",
    },
    PanelRoute {
        panel: PanelTag::Experience,
        keywords: &["experience", "work"],
        router_ack: "Syncing professional timeline and career highlights.",
        nav_prompt: "What is the work experience?",
        nav_ack: "Here is the professional timeline.",
        menu_label: "Where has he worked?",
    },
    PanelRoute {
        panel: PanelTag::Skills,
        keywords: &["skill", "stack"],
        router_ack: "Mapping the technical arsenal and core capabilities.",
        nav_prompt: "List technical skills.",
        nav_ack: "Here is the technical arsenal.",
        menu_label: "What is the technical stack?",
    },
    PanelRoute {
        panel: PanelTag::Publications,
        keywords: &["research", "publication"],
        router_ack: "Accessing scientific publications and research datasets.",
        nav_prompt: "Show publications.",
        nav_ack: "Here are the scientific publications.",
        menu_label: "What are his publications?",
    },
    PanelRoute {
        panel: PanelTag::Media,
        keywords: &["media", "press"],
        router_ack: "Loading global frequency logs and media footprint.",
        nav_prompt: "Show media coverage.",
        nav_ack: "Here is the recent press coverage.",
        menu_label: "What is the media footprint?",
    },
    PanelRoute {
        panel: PanelTag::Contact,
        keywords: &["contact", "hire"],
        router_ack: "Establishing communication link. Channels are open.",
        nav_prompt: "How do I contact?",
        nav_ack: "Communication channels open.",
        menu_label: "Best way to contact him?",
    },
    PanelRoute {
        panel: PanelTag::About,
        keywords: &["about", "who"],
        router_ack: "Running primary identity synchronization. Here is the overview.",
        nav_prompt: "Who is Gobinath?",
        nav_ack: "Running identity sync. Here is the profile overview.",
        menu_label: "Who is Gobinath?",
    },
    PanelRoute {
        panel: PanelTag::Education,
        keywords: &["edu"],
        router_ack: "Accessing academic core modules and educational background.",
        nav_prompt: "Show education history.",
        nav_ack: "Here is the academic background.",
        menu_label: "What is his background?",
    },
    PanelRoute {
        panel: PanelTag::Gallery,
        keywords: &["photo", "gallery", "visual"],
        router_ack: "Opening visual archives and lab documentation.",
        nav_prompt: "Show me the visual vault.",
        nav_ack: "Opening visual archives.",
        menu_label: "Can I see the visual vault?",
    },
    PanelRoute {
        panel: PanelTag::Learning,
        keywords: &["learning", "database", "mysql"],
        router_ack:
            "Syncing recent knowledge acquisition logs for Database and MySQL optimization.",
        nav_prompt: "What have you been learning lately?",
        nav_ack: "Accessing knowledge synchronization log.",
        menu_label: "Recent Learning: DB, MySQL",
    },
    PanelRoute {
        panel: PanelTag::Tools,
        keywords: &["tool", "claude", "cursor"],
        router_ack:
            "Inventory check complete. Displaying favorite technical tools and development stack.",
        nav_prompt: "What tools do you use?",
        nav_ack: "Displaying favorite tools and development stack.",
        menu_label: "Favorite Tools: Claude, Cursor",
    },
];

/// Sidebar menu order.
pub const SIDEBAR_ORDER: [PanelTag; 12] = [
    PanelTag::About,
    PanelTag::Projects,
    PanelTag::Patents,
    PanelTag::Experience,
    PanelTag::Skills,
    PanelTag::Publications,
    PanelTag::Media,
    PanelTag::Learning,
    PanelTag::Tools,
    PanelTag::Gallery,
    PanelTag::Education,
    PanelTag::Contact,
];
