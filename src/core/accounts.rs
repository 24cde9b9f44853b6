//! Account flow
//!
//! Sign-up creates the identity, writes the user document and provisions
//! the synthetic test history, in that order. Generation runs exactly once
//! per created account.

use crate::adapters::identity::{AuthenticatedUser, IdentityProvider};
use crate::adapters::storage::{write_document, DocumentStore};
use crate::core::generator::RecordGenerator;
use crate::domain::ids::DocumentPath;
use crate::domain::{AppError, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Initial content of `users/{uid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful sign-up
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthenticatedUser,

    /// Number of generated test records
    pub generated_records: usize,
}

/// Orchestrates sign-up, sign-in and password resets
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
    generator: RecordGenerator,
}

impl AccountService {
    /// Create a new account service
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        generator: RecordGenerator,
    ) -> Self {
        Self {
            identity,
            store,
            generator,
        }
    }

    /// Create an account and provision its test history
    ///
    /// # Errors
    ///
    /// - `Validation("Passwords do not match")` before anything is created
    /// - `EmailAlreadyInUse` and other identity errors from the provider
    /// - `GenerationFailure` when the test results cannot be written; the
    ///   identity and user document already exist at that point
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignUpOutcome> {
        if password != confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        let user = self.identity.sign_up(email, password).await?;

        let document = UserDocument {
            email: user.email.clone(),
            created_at: Utc::now(),
        };
        write_document(
            self.store.as_ref(),
            &DocumentPath::user_profile(&user.uid),
            &document,
        )
        .await?;

        let mut rng = StdRng::from_entropy();
        let records = self
            .generator
            .provision(self.store.as_ref(), &user.uid, &mut rng)
            .await?;

        tracing::info!(
            uid = %user.uid,
            provider = self.identity.provider_name(),
            records = records.len(),
            "Sign up successful"
        );

        Ok(SignUpOutcome {
            user,
            generated_records: records.len(),
        })
    }

    /// Check credentials
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        self.identity.sign_in(email, password).await
    }

    /// End a session
    pub async fn sign_out(&self, user: &AuthenticatedUser) -> Result<()> {
        self.identity.sign_out(user).await
    }

    /// Start a password reset
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.identity.send_password_reset(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::identity::LocalIdentityProvider;
    use crate::adapters::storage::{read_document, MemoryStore};
    use crate::config::IdentityConfig;
    use crate::core::generator::FixedClock;
    use crate::domain::record::decode_record_set;
    use chrono::NaiveDate;

    fn service() -> (Arc<MemoryStore>, AccountService) {
        let store = Arc::new(MemoryStore::new());
        let identity = Arc::new(LocalIdentityProvider::new(
            store.clone(),
            &IdentityConfig::default(),
        ));
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let generator = RecordGenerator::new(Arc::new(FixedClock(today)));
        (store.clone(), AccountService::new(identity, store, generator))
    }

    #[tokio::test]
    async fn test_sign_up_writes_user_and_results() {
        let (store, service) = service();
        let outcome = service
            .sign_up("ana@example.com", "secret1", "secret1")
            .await
            .unwrap();

        let user_doc: UserDocument = read_document(
            store.as_ref(),
            &DocumentPath::user_profile(&outcome.user.uid),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(user_doc.email, "ana@example.com");

        let results = store
            .read(&DocumentPath::test_results(&outcome.user.uid))
            .await
            .unwrap()
            .unwrap();
        let records = decode_record_set(results).unwrap();
        assert_eq!(records.len(), outcome.generated_records);
        assert!((12..=14).contains(&records.len()));
    }

    #[tokio::test]
    async fn test_password_mismatch_creates_nothing() {
        let (store, service) = service();
        let err = service
            .sign_up("ana@example.com", "secret1", "secret2")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: Passwords do not match");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_does_not_regenerate() {
        let (store, service) = service();
        let first = service
            .sign_up("ana@example.com", "secret1", "secret1")
            .await
            .unwrap();
        let path = DocumentPath::test_results(&first.user.uid);
        let before = store.read(&path).await.unwrap();

        let err = service
            .sign_up("ana@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyInUse(_)));
        assert_eq!(store.read(&path).await.unwrap(), before);
    }
}
