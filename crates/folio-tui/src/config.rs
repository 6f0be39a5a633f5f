//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use folio_core::Persona;
use folio_genai::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Name of the preferences file inside the data directory.
pub const PREFS_FILE: &str = "prefs.json";

/// Settings for one run of the TUI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Persona to start with; `None` shows the launcher.
    pub persona: Option<Persona>,
    /// Profile JSON to load instead of the built-in one.
    pub profile_path: Option<PathBuf>,
    /// Where preferences are persisted.
    pub data_dir: PathBuf,
    /// Delay before a typed message gets its reply.
    pub reply_delay: Duration,
    /// Delay before a sidebar navigation gets its reply.
    pub nav_delay: Duration,
    /// Length of the launch transition.
    pub launch_delay: Duration,
    /// Hosted model name for the Q&A agent.
    pub model: String,
    /// REST base for the hosted model.
    pub api_base: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            persona: None,
            profile_path: None,
            data_dir: PathBuf::from(".folio"),
            reply_delay: Duration::from_millis(800),
            nav_delay: Duration::from_millis(600),
            launch_delay: Duration::from_millis(800),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            log_file: PathBuf::from("/tmp/folio-tui.log"),
        }
    }
}

impl AppConfig {
    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join(PREFS_FILE)
    }

    /// Directory that relative image paths in the profile resolve against.
    pub fn asset_dir(&self) -> PathBuf {
        self.profile_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reply_delay, Duration::from_millis(800));
        assert_eq!(config.nav_delay, Duration::from_millis(600));
        assert_eq!(config.prefs_path(), PathBuf::from(".folio/prefs.json"));
        assert_eq!(config.asset_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_asset_dir_follows_profile() {
        let config = AppConfig {
            profile_path: Some(PathBuf::from("/srv/folio/profile.json")),
            ..AppConfig::default()
        };
        assert_eq!(config.asset_dir(), PathBuf::from("/srv/folio"));
    }
}
