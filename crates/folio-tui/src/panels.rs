//! Content blocks rendered under tagged replies.

use folio_core::{PanelTag, ProfileData};
use folio_tui_components::{Attachment, AttachmentLine, Theme};

use crate::store::Avatar;

/// Build the attachment for `panel` from the profile.
pub fn attachment(panel: PanelTag, profile: &ProfileData, avatar: &Avatar, theme: &Theme) -> Attachment {
    let heading = |text: &str| AttachmentLine::new(text, theme.bold());
    let muted = |text: String| AttachmentLine::new(text, theme.muted_style());
    let accent = |text: String| AttachmentLine::new(text, theme.model_style());
    let mut lines = Vec::new();

    match panel {
        PanelTag::About => {
            let id = &profile.identity;
            lines.push(accent(id.headline.join(" ")));
            lines.push(heading(&id.name));
            lines.push(muted(format!("{} · {}", id.tagline, id.location)));
            lines.push(AttachmentLine::blank());
            lines.push(AttachmentLine::plain(id.summary.clone()));
            lines.push(AttachmentLine::plain(id.current_focus.clone()));
            if !id.badges.is_empty() {
                lines.push(accent(
                    id.badges
                        .iter()
                        .map(|b| format!("[{}]", b))
                        .collect::<Vec<_>>()
                        .join(" "),
                ));
            }
            lines.push(AttachmentLine::blank());
            lines.push(muted(format!("Profile image: {}", avatar.describe())));
            lines.push(muted("Ctrl+P sets a custom profile image".to_string()));
        }
        PanelTag::Projects => {
            for project in &profile.projects {
                lines.push(heading(&project.title));
                lines.push(AttachmentLine::plain(project.description.clone()));
                if !project.tags.is_empty() {
                    lines.push(accent(format!("#{}", project.tags.join(" #"))));
                }
                if let Some(link) = &project.link {
                    lines.push(muted(link.clone()));
                }
                lines.push(AttachmentLine::blank());
            }
        }
        PanelTag::Patents => {
            for patent in &profile.patents {
                lines.push(heading(&patent.title));
                lines.push(accent(format!("{} · {}", patent.status, patent.year)));
                lines.push(AttachmentLine::plain(patent.description.clone()));
                lines.push(AttachmentLine::blank());
            }
        }
        PanelTag::Experience => {
            for exp in &profile.experiences {
                lines.push(heading(&format!("{} @ {}", exp.role, exp.company)));
                lines.push(muted(exp.period.clone()));
                for highlight in &exp.highlights {
                    lines.push(AttachmentLine::plain(format!("• {}", highlight)));
                }
                lines.push(AttachmentLine::blank());
            }
        }
        PanelTag::Skills => {
            for group in &profile.skills {
                lines.push(heading(&group.category));
                lines.push(AttachmentLine::plain(group.items.join(" · ")));
            }
        }
        PanelTag::Publications => {
            for publication in &profile.publications {
                lines.push(heading(&publication.title));
                lines.push(muted(format!("{} ({})", publication.venue, publication.year)));
                if let Some(link) = &publication.link {
                    lines.push(muted(link.clone()));
                }
            }
        }
        PanelTag::Media => {
            for item in &profile.media {
                lines.push(heading(&item.title));
                lines.push(muted(format!("{} · {}", item.outlet, item.date)));
            }
        }
        PanelTag::Contact => {
            let social = &profile.social;
            lines.push(heading("Channels"));
            lines.push(AttachmentLine::plain(format!("Email     {}", social.email)));
            let links = [
                ("LinkedIn", &social.linkedin),
                ("GitHub", &social.github),
                ("Website", &social.website),
            ];
            for (label, value) in links {
                if let Some(value) = value {
                    lines.push(AttachmentLine::plain(format!("{:<9} {}", label, value)));
                }
            }
        }
        PanelTag::Education => {
            for edu in &profile.education {
                lines.push(heading(&edu.degree));
                lines.push(muted(format!("{} · {}", edu.institution, edu.period)));
                if let Some(details) = &edu.details {
                    lines.push(AttachmentLine::plain(details.clone()));
                }
            }
        }
        PanelTag::Gallery => {
            for item in &profile.gallery {
                lines.push(AttachmentLine::plain(format!("▣ {}", item.caption)));
                lines.push(muted(format!("  {} · {}", item.category, item.image)));
            }
        }
        PanelTag::Learning => {
            for item in &profile.learning {
                lines.push(heading(&item.topic));
                lines.push(accent(item.status.clone()));
                lines.push(AttachmentLine::plain(item.description.clone()));
                lines.push(AttachmentLine::blank());
            }
        }
        PanelTag::Tools => {
            for tool in &profile.tools {
                lines.push(AttachmentLine::plain(format!("{:<10} {}", tool.name, tool.purpose)));
            }
        }
    }

    while lines.last().is_some_and(|l| l.text.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(muted("Nothing here yet.".to_string()));
    }

    Attachment {
        title: panel.name().to_string(),
        lines,
    }
}
