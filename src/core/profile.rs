//! Profile editing
//!
//! Profiles share the `users/{uid}` document with the sign-up fields, so an
//! existing document is merge-updated and never replaced.

use crate::adapters::storage::{read_document, DocumentStore};
use crate::domain::ids::{DocumentPath, UserId};
use crate::domain::{AppError, Result, UserProfile};
use serde_json::Value;
use std::sync::Arc;

/// Reads and writes user profiles
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load the profile of `user_id`
    ///
    /// Returns `None` when the user document does not exist.
    pub async fn load(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let path = DocumentPath::user_profile(user_id);
        Ok(read_document(self.store.as_ref(), &path).await?)
    }

    /// Validate and store `profile`
    ///
    /// # Errors
    ///
    /// Returns `Validation` with the first violated minimum; nothing is
    /// written in that case.
    pub async fn save(&self, user_id: &UserId, profile: &UserProfile) -> Result<()> {
        profile.validate().map_err(AppError::Validation)?;

        let path = DocumentPath::user_profile(user_id);
        let fields = match serde_json::to_value(profile)? {
            Value::Object(fields) => fields,
            other => {
                return Err(AppError::Serialization(format!(
                    "Profile serialized to {other} instead of an object"
                )))
            }
        };

        if self.store.read(&path).await?.is_some() {
            self.store.update(&path, fields).await?;
            tracing::info!(uid = %user_id, "Profile updated");
        } else {
            self.store.write(&path, Value::Object(fields)).await?;
            tracing::info!(uid = %user_id, "Profile created");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use serde_json::json;

    fn setup() -> (Arc<MemoryStore>, ProfileService, UserId) {
        let store = Arc::new(MemoryStore::new());
        let service = ProfileService::new(store.clone());
        (store, service, UserId::new("u1").unwrap())
    }

    #[tokio::test]
    async fn test_save_keeps_sign_up_fields() {
        let (store, service, uid) = setup();
        let path = DocumentPath::user_profile(&uid);
        store
            .write(&path, json!({"email": "ana@example.com", "createdAt": "2025-01-01T00:00:00Z"}))
            .await
            .unwrap();

        service
            .save(&uid, &UserProfile::new(170.0, 65.5, 34, "female"))
            .await
            .unwrap();

        let doc = store.read(&path).await.unwrap().unwrap();
        assert_eq!(doc["email"], json!("ana@example.com"));
        assert_eq!(doc["height"], json!(170.0));
        assert_eq!(doc["gender"], json!("female"));
    }

    #[tokio::test]
    async fn test_save_creates_missing_document() {
        let (_, service, uid) = setup();
        assert_eq!(service.load(&uid).await.unwrap(), None);

        let profile = UserProfile::new(180.0, 72.0, 30, "male");
        service.save(&uid, &profile).await.unwrap();
        assert_eq!(service.load(&uid).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_invalid_profile_is_not_written() {
        let (store, service, uid) = setup();
        let err = service
            .save(&uid, &UserProfile::new(45.0, 70.0, 30, "male"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: Height must be at least 50 cm");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_load_reads_string_fields() {
        let (store, service, uid) = setup();
        store
            .write(
                &DocumentPath::user_profile(&uid),
                json!({"email": "a@b.co", "height": "175", "weight": "70", "age": "41"}),
            )
            .await
            .unwrap();

        let profile = service.load(&uid).await.unwrap().unwrap();
        assert_eq!(profile.height, Some(175.0));
        assert_eq!(profile.age, Some(41));
        assert_eq!(profile.gender, None);
    }
}
