//! Static profile content rendered by the panels.
//!
//! The data is read-only for the whole process. A built-in copy is embedded
//! at compile time; `ProfileData::load` reads a replacement from a JSON file
//! with the same shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const BUILTIN_PROFILE: &str = include_str!("../data/profile.json");

/// Identity block shown by the About panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub headline: Vec<String>,
    pub tagline: String,
    pub summary: String,
    pub current_focus: String,
    pub location: String,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub venue: String,
    pub year: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patent {
    pub title: String,
    pub status: String,
    pub year: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub outlet: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub caption: String,
    pub category: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningItem {
    pub topic: String,
    pub status: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinks {
    pub email: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Every content block the panels can show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub identity: Identity,
    /// Default profile image reference (path or URL).
    pub profile_image: String,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<Education>,
    pub publications: Vec<Publication>,
    pub patents: Vec<Patent>,
    pub media: Vec<MediaItem>,
    pub gallery: Vec<GalleryItem>,
    pub learning: Vec<LearningItem>,
    pub tools: Vec<Tool>,
    pub social: SocialLinks,
}

impl ProfileData {
    /// The embedded profile.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_PROFILE)
    }

    /// Parse a profile from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let profile: ProfileData = serde_json::from_str(json)?;
        if profile.identity.name.trim().is_empty() {
            return Err(CoreError::InvalidProfile("identity.name is empty".into()));
        }
        Ok(profile)
    }

    /// Read a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoreError::InvalidProfile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// System instruction for the Q&A delegate, built from this profile.
    pub fn system_context(&self) -> Result<String, CoreError> {
        let name = &self.identity.name;
        let first_name = name.split_whitespace().next().unwrap_or(name);
        let flagship: Vec<&str> = self
            .projects
            .iter()
            .take(2)
            .map(|p| p.title.as_str())
            .collect();

        Ok(format!(
            "You are the \"Vibe Agent\" for {name}'s personal portfolio.\n\
             Your persona is professional, high-energy, and technical, matching his \"Vibe Coder\" brand.\n\
             \n\
             Here is {first_name}'s complete profile data:\n\
             - Projects: {projects}\n\
             - Experience: {experiences}\n\
             - Skills: {skills}\n\
             - Education: {education}\n\
             - Publications: {publications}\n\
             - Socials: {social}\n\
             \n\
             Guidelines:\n\
             1. Answer questions specifically about {first_name} based on this data.\n\
             2. If asked about \"Agentic AI\" or \"Social Consumer Products\", emphasize his specific projects like {flagship}.\n\
             3. Keep responses concise (under 3-4 sentences) unless asked for deep detail.\n\
             4. Use a slightly casual, tech-forward tone (e.g., \"shipped,\" \"scaled,\" \"stack\").\n\
             5. If asked for contact info, provide his email: {email}.\n\
             6. Do not make up facts. If you don't know, suggest they contact him directly.",
            projects = serde_json::to_string(&self.projects)?,
            experiences = serde_json::to_string(&self.experiences)?,
            skills = serde_json::to_string(&self.skills)?,
            education = serde_json::to_string(&self.education)?,
            publications = serde_json::to_string(&self.publications)?,
            social = serde_json::to_string(&self.social)?,
            flagship = flagship
                .iter()
                .map(|t| format!("\"{t}\""))
                .collect::<Vec<_>>()
                .join(" and "),
            email = self.social.email,
        ))
    }
}
