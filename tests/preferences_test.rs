//! Dark mode preference persistence and change notification

use behealthy::config::PreferencesConfig;
use behealthy::core::preferences::{PreferenceStore, Preferences};
use tempfile::TempDir;

#[tokio::test]
async fn test_preference_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = PreferencesConfig {
        path: Some(dir.path().join("prefs").join("preferences.json")),
    };

    let store = PreferenceStore::from_config(&config).await;
    assert!(!store.dark_mode());
    assert!(store.toggle_dark_mode().await.unwrap());

    let reopened = PreferenceStore::from_config(&config).await;
    assert!(reopened.dark_mode());

    let raw = std::fs::read_to_string(config.path.as_ref().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"darkMode": true}));
}

#[tokio::test]
async fn test_subscribers_see_every_view_change() {
    let store = PreferenceStore::in_memory();
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    store.set_dark_mode(true).await.unwrap();

    first.changed().await.unwrap();
    second.changed().await.unwrap();
    assert_eq!(*first.borrow(), Preferences { dark_mode: true });
    assert_eq!(*second.borrow(), Preferences { dark_mode: true });
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "not json").unwrap();

    let store = PreferenceStore::open(&path).await;
    assert_eq!(store.current(), Preferences::default());

    store.set_dark_mode(true).await.unwrap();
    assert!(PreferenceStore::open(&path).await.dark_mode());
}
