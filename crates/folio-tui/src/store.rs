//! Observable profile-image override.
//!
//! The override is persisted in a `KeyValueStore` and published on a watch
//! channel: a new subscriber sees the current value immediately and every
//! later write after that.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use folio_core::{KeyValueStore, StoreError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Storage key for the override.
pub const PROFILE_IMAGE_KEY: &str = "vibe_profile_img";

/// Shorter values are never treated as an image.
const MIN_OVERRIDE_LEN: usize = 100;

/// Errors from setting the override.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image type for {0} (use png, jpg, gif, webp or svg)")]
    UnsupportedType(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// True when `value` is usable as an image override.
pub fn is_valid_override(value: &str) -> bool {
    value.starts_with("data:") && value.len() > MIN_OVERRIDE_LEN
}

/// MIME type for an image path, by extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Encode raw bytes as a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// What the UI should show as the profile image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// A valid uploaded override.
    Custom { mime: String, bytes: usize },
    /// The default reference, which exists on disk or is remote.
    Default(String),
    /// The default reference points at a missing file.
    Missing(String),
}

impl Avatar {
    /// Resolve the override against the default reference.
    ///
    /// Relative default paths are checked against `base_dir`; URLs are
    /// assumed reachable.
    pub fn resolve(override_value: Option<&str>, default_ref: &str, base_dir: &Path) -> Self {
        if let Some(value) = override_value.filter(|v| is_valid_override(v)) {
            let (header, payload) = value.split_once(',').unwrap_or((value, ""));
            let mime = header
                .trim_start_matches("data:")
                .trim_end_matches(";base64")
                .to_string();
            return Avatar::Custom {
                mime,
                bytes: payload.len() / 4 * 3,
            };
        }

        if default_ref.starts_with("http://") || default_ref.starts_with("https://") {
            return Avatar::Default(default_ref.to_string());
        }
        let path = base_dir.join(default_ref);
        if path.exists() {
            Avatar::Default(default_ref.to_string())
        } else {
            Avatar::Missing(default_ref.to_string())
        }
    }

    /// One-line description for the launcher and About panel.
    pub fn describe(&self) -> String {
        match self {
            Avatar::Custom { mime, bytes } => {
                format!("◉ custom image ({}, {} KB)", mime, bytes.div_ceil(1024))
            }
            Avatar::Default(reference) => format!("◉ {}", reference),
            Avatar::Missing(_) => "◎ (no image)".to_string(),
        }
    }
}

/// Profile-image override backed by a key-value store.
pub struct ProfileImageStore {
    store: Box<dyn KeyValueStore>,
    tx: watch::Sender<Option<String>>,
}

impl ProfileImageStore {
    /// Load the persisted value and start publishing.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let current = store.get(PROFILE_IMAGE_KEY)?;
        let (tx, _rx) = watch::channel(current);
        Ok(Self { store, tx })
    }

    /// Subscribe; the receiver already holds the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Persist and publish a raw value.
    pub fn set(&mut self, value: &str) -> Result<(), StoreError> {
        self.store.set(PROFILE_IMAGE_KEY, value)?;
        self.tx.send_replace(Some(value.to_string()));
        Ok(())
    }

    /// Remove the override.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(PROFILE_IMAGE_KEY)?;
        self.tx.send_replace(None);
        info!("Profile image override cleared");
        Ok(())
    }

    /// Read an image file and store it as a data URL.
    pub fn upload(&mut self, path: &Path) -> Result<(), ImageError> {
        let mime =
            mime_for_path(path).ok_or_else(|| ImageError::UnsupportedType(path.to_path_buf()))?;
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let url = to_data_url(mime, &bytes);
        if !is_valid_override(&url) {
            warn!(path = %path.display(), size = bytes.len(), "Image too small to use as override");
        }
        self.set(&url)?;
        info!(path = %path.display(), mime, size = bytes.len(), "Profile image uploaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MemoryStore;

    fn long_data_url() -> String {
        to_data_url("image/png", &[7u8; 120])
    }

    #[test]
    fn test_validity_rule() {
        assert!(!is_valid_override("data:image/png;base64,AAAA"));
        assert!(!is_valid_override(&"x".repeat(200)));
        assert!(is_valid_override(&long_data_url()));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("me.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("me.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("me.txt")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }

    #[test]
    fn test_replay_on_subscribe() {
        let mut backing = MemoryStore::new();
        backing.set(PROFILE_IMAGE_KEY, "persisted").unwrap();
        let store = ProfileImageStore::open(Box::new(backing)).unwrap();

        let rx = store.subscribe();
        assert_eq!(rx.borrow().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_publish_on_write_reaches_every_subscriber() {
        let mut store = ProfileImageStore::open(Box::new(MemoryStore::new())).unwrap();
        let mut first = store.subscribe();
        let mut second = store.subscribe();
        assert_eq!(*first.borrow(), None);

        let url = long_data_url();
        store.set(&url).unwrap();
        assert!(first.has_changed().unwrap());
        assert_eq!(first.borrow_and_update().as_deref(), Some(url.as_str()));
        assert_eq!(second.borrow_and_update().as_deref(), Some(url.as_str()));

        store.clear().unwrap();
        assert_eq!(*first.borrow_and_update(), None);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_set_without_subscribers_still_persists() {
        let mut store = ProfileImageStore::open(Box::new(MemoryStore::new())).unwrap();
        store.set("value").unwrap();
        assert_eq!(store.current().as_deref(), Some("value"));
        assert_eq!(store.subscribe().borrow().as_deref(), Some("value"));
    }

    #[test]
    fn test_upload_encodes_file() {
        let dir = std::env::temp_dir().join(format!("folio-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("avatar.png");
        std::fs::write(&path, [1u8; 256]).unwrap();

        let mut store = ProfileImageStore::open(Box::new(MemoryStore::new())).unwrap();
        store.upload(&path).unwrap();
        let value = store.current().unwrap();
        assert!(value.starts_with("data:image/png;base64,"));
        assert!(is_valid_override(&value));

        assert!(matches!(
            store.upload(&dir.join("notes.txt")),
            Err(ImageError::UnsupportedType(_))
        ));
        assert!(matches!(
            store.upload(&dir.join("missing.png")),
            Err(ImageError::Read { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_avatar_resolution() {
        let base = std::env::temp_dir();
        let url = long_data_url();

        match Avatar::resolve(Some(&url), "assets/profile.jpg", &base) {
            Avatar::Custom { mime, .. } => assert_eq!(mime, "image/png"),
            other => panic!("expected custom avatar, got {:?}", other),
        }
        // Invalid overrides fall back to the default reference.
        assert_eq!(
            Avatar::resolve(Some("data:x"), "https://example.com/me.jpg", &base),
            Avatar::Default("https://example.com/me.jpg".into())
        );
        assert_eq!(
            Avatar::resolve(None, "definitely/not/here.jpg", &base),
            Avatar::Missing("definitely/not/here.jpg".into())
        );
        assert_eq!(
            Avatar::Missing("x".into()).describe(),
            "◎ (no image)"
        );
    }
}
