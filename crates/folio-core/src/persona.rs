//! Visitor personas chosen on the launcher screen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Greeting used when no persona was chosen.
pub const DEFAULT_GREETING: &str =
    "Hello. I am the Vibe Agent. Protocol synchronized for Gobinath's vault.";

/// Visitor-declared role. Only selects the opening greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Investor,
    Researcher,
    Collaborator,
    Curious,
}

impl Persona {
    /// Launcher order.
    pub const ALL: [Persona; 4] = [
        Persona::Investor,
        Persona::Researcher,
        Persona::Collaborator,
        Persona::Curious,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Investor => "Investor",
            Persona::Researcher => "Researcher",
            Persona::Collaborator => "Collaborator",
            Persona::Curious => "Curious",
        }
    }

    /// First message of a fresh conversation.
    pub fn greeting(&self) -> &'static str {
        match self {
            Persona::Investor => "Investor access granted. Intelligence bridge synchronized. Accessing product roadmap and patent archives.",
            Persona::Researcher => "Academic link established. Accessing publication datasets and laboratory protocols.",
            Persona::Collaborator => "Partnership protocol initiated. Synchronizing technical stack and project logs.",
            Persona::Curious => "Visitor access enabled. Welcome to the Bio-Digital vault. Loading overview.",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownPersona(s.to_string()))
    }
}
