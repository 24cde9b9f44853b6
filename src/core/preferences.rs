//! UI preferences
//!
//! A single process-wide store for display preferences. Views read the
//! current value and subscribe to changes instead of each reading the
//! persisted flag on their own.

use crate::config::PreferencesConfig;
use crate::domain::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{watch, Mutex};

/// Display preferences, persisted as `{"darkMode": bool}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Shared preference state with change notification
pub struct PreferenceStore {
    sender: watch::Sender<Preferences>,
    path: Option<PathBuf>,

    /// Serializes change-and-persist sequences
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    /// Store that keeps preferences in memory only
    pub fn in_memory() -> Self {
        Self::with_initial(Preferences::default(), None)
    }

    /// Store persisted at `path`
    ///
    /// A missing or unreadable file yields the defaults.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = load_preferences(&path).await;
        Self::with_initial(initial, Some(path))
    }

    /// Store configured by the `[preferences]` section
    pub async fn from_config(config: &PreferencesConfig) -> Self {
        match config.path {
            Some(ref path) => Self::open(path).await,
            None => Self::in_memory(),
        }
    }

    fn with_initial(initial: Preferences, path: Option<PathBuf>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Current preferences
    pub fn current(&self) -> Preferences {
        *self.sender.borrow()
    }

    /// Whether dark mode is on
    pub fn dark_mode(&self) -> bool {
        self.current().dark_mode
    }

    /// Turn dark mode on or off
    ///
    /// # Errors
    ///
    /// Returns an I/O error when persisting fails; the in-memory value is
    /// updated regardless.
    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.apply(Preferences { dark_mode: enabled }).await
    }

    /// Flip dark mode and return the new value
    pub async fn toggle_dark_mode(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let enabled = !self.dark_mode();
        self.apply(Preferences { dark_mode: enabled }).await?;
        Ok(enabled)
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.sender.subscribe()
    }

    async fn apply(&self, preferences: Preferences) -> Result<()> {
        let previous = self.sender.send_replace(preferences);
        if previous != preferences {
            tracing::debug!(dark_mode = preferences.dark_mode, "Preferences changed");
        }

        match self.path {
            Some(ref path) => save_preferences(path, &preferences).await,
            None => Ok(()),
        }
    }
}

async fn load_preferences(path: &Path) -> Preferences {
    let contents = match fs::read(path).await {
        Ok(contents) => contents,
        Err(_) => return Preferences::default(),
    };

    serde_json::from_slice(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable preferences file");
        Preferences::default()
    })
}

async fn save_preferences(path: &Path, preferences: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let body = serde_json::to_vec(preferences)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, body).await?;
    fs::rename(&staging, path).await.map_err(|e| {
        AppError::Io(format!("cannot replace {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults_to_light_mode() {
        let store = PreferenceStore::in_memory();
        assert!(!store.dark_mode());
    }

    #[tokio::test]
    async fn test_toggle_and_subscribe() {
        let store = PreferenceStore::in_memory();
        let mut rx = store.subscribe();

        assert!(store.toggle_dark_mode().await.unwrap());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().dark_mode);

        store.set_dark_mode(false).await.unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().dark_mode);
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join("preferences.json");

        let store = PreferenceStore::open(&path).await;
        store.set_dark_mode(true).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"darkMode":true}"#);

        let reopened = PreferenceStore::open(&path).await;
        assert!(reopened.dark_mode());
    }

    #[tokio::test]
    async fn test_unparsable_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "dark please").unwrap();

        let store = PreferenceStore::open(&path).await;
        assert!(!store.dark_mode());
    }
}
