//! Document-store backed identity provider
//!
//! Accounts are stored at `accounts/{digest}` where the digest is the
//! SHA-256 of the normalized email, so the email never appears in a path.
//! Passwords are kept as `sha256(salt || password)` with a random salt.

use super::traits::{is_valid_email, normalize_email, AuthenticatedUser, IdentityProvider};
use crate::adapters::storage::{read_document, write_document, DocumentStore};
use crate::config::schema::IdentityConfig;
use crate::domain::ids::{DocumentPath, UserId};
use crate::domain::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Stored account document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDocument {
    uid: String,
    email: String,
    salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Pending password reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetDocument {
    email: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Identity provider keeping accounts in the document store
pub struct LocalIdentityProvider {
    store: Arc<dyn DocumentStore>,
    min_password_length: usize,
}

impl LocalIdentityProvider {
    /// Create a provider writing to `store`
    pub fn new(store: Arc<dyn DocumentStore>, config: &IdentityConfig) -> Self {
        Self {
            store,
            min_password_length: config.min_password_length,
        }
    }

    /// Set a new password using a token issued by `send_password_reset`
    ///
    /// The token is consumed whether or not it has expired.
    ///
    /// # Errors
    ///
    /// Returns `Authentication` for unknown or expired tokens and
    /// `Validation` when the new password is too short.
    pub async fn complete_password_reset(&self, token: &str, new_password: &str) -> Result<()> {
        self.check_password(new_password)?;

        let reset_path = reset_path(token)?;
        let reset: ResetDocument = read_document(self.store.as_ref(), &reset_path)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid password reset token".to_string()))?;
        self.store.delete(&reset_path).await?;

        if reset.expires_at < Utc::now() {
            return Err(AppError::Authentication(
                "Password reset token has expired".to_string(),
            ));
        }

        let path = account_path(&reset.email)?;
        let mut account: AccountDocument = read_document(self.store.as_ref(), &path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account for {}", reset.email)))?;

        account.salt = new_salt();
        account.password_hash = hash_password(&account.salt, new_password);
        write_document(self.store.as_ref(), &path, &account).await?;

        tracing::info!(uid = %account.uid, "Password reset completed");
        Ok(())
    }

    fn check_password(&self, password: &str) -> Result<()> {
        if password.chars().count() < self.min_password_length {
            return Err(AppError::Validation(format!(
                "Password should be at least {} characters",
                self.min_password_length
            )));
        }
        Ok(())
    }

    async fn find_account(&self, email: &str) -> Result<Option<AccountDocument>> {
        Ok(read_document(self.store.as_ref(), &account_path(email)?).await?)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn provider_name(&self) -> &'static str {
        "local"
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        self.check_password(password)?;

        if self.find_account(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyInUse(email));
        }

        let uid = UserId::generate();
        let salt = new_salt();
        let account = AccountDocument {
            uid: uid.to_string(),
            email: email.clone(),
            password_hash: hash_password(&salt, password),
            salt,
            created_at: Utc::now(),
        };
        write_document(self.store.as_ref(), &account_path(&email)?, &account).await?;

        tracing::info!(uid = %uid, backend = self.store.backend_name(), "Account created");
        Ok(AuthenticatedUser { uid, email })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let email = normalize_email(email);
        let invalid = || AppError::Authentication("Invalid email or password".to_string());

        let account = self.find_account(&email).await?.ok_or_else(invalid)?;
        if !password_matches(&account, password) {
            tracing::warn!(uid = %account.uid, "Rejected sign-in attempt");
            return Err(invalid());
        }

        let uid = UserId::new(account.uid)
            .map_err(|e| AppError::Serialization(format!("Stored account has a bad uid: {e}")))?;
        tracing::debug!(uid = %uid, "Signed in");
        Ok(AuthenticatedUser {
            uid,
            email: account.email,
        })
    }

    async fn sign_out(&self, user: &AuthenticatedUser) -> Result<()> {
        tracing::debug!(uid = %user.uid, "Signed out");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let email = normalize_email(email);
        let account = self
            .find_account(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account for {email}")))?;

        let token = uuid::Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let reset = ResetDocument {
            email,
            created_at: now,
            expires_at: now + Duration::hours(RESET_TOKEN_TTL_HOURS),
        };
        write_document(self.store.as_ref(), &reset_path(&token)?, &reset).await?;

        // No mail transport; the token is surfaced through the log
        tracing::info!(uid = %account.uid, token = %token, "Password reset requested");
        Ok(())
    }
}

fn account_path(email: &str) -> Result<DocumentPath> {
    let digest = format!("{:x}", Sha256::digest(email.as_bytes()));
    DocumentPath::new("accounts")
        .and_then(|p| p.child(&digest))
        .map_err(AppError::Validation)
}

fn reset_path(token: &str) -> Result<DocumentPath> {
    DocumentPath::new("password_resets")
        .and_then(|p| p.child(token))
        .map_err(|_| AppError::Authentication("Invalid password reset token".to_string()))
}

/// Compare the stored hash without an early exit on the first differing byte
fn password_matches(account: &AccountDocument, password: &str) -> bool {
    let candidate = hash_password(&account.salt, password);
    candidate
        .as_bytes()
        .ct_eq(account.password_hash.as_bytes())
        .into()
}

fn new_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt.iter().map(|b| format!("{b:02x}")).collect()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;

    fn provider() -> (Arc<MemoryStore>, LocalIdentityProvider) {
        let store = Arc::new(MemoryStore::new());
        let provider = LocalIdentityProvider::new(store.clone(), &IdentityConfig::default());
        (store, provider)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let (_, provider) = provider();
        let created = provider.sign_up(" Ana@Example.com", "secret1").await.unwrap();
        assert_eq!(created.email, "ana@example.com");
        assert_eq!(created.uid.as_str().len(), 32);

        let signed_in = provider.sign_in("ana@example.com", "secret1").await.unwrap();
        assert_eq!(signed_in, created);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_, provider) = provider();
        provider.sign_up("ana@example.com", "secret1").await.unwrap();

        let err = provider.sign_up("ANA@example.com", "other12").await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyInUse(_)));
        assert_eq!(
            err.to_string(),
            "This email is already registered. Please log in or reset your password."
        );
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let (_, provider) = provider();
        provider.sign_up("ana@example.com", "secret1").await.unwrap();

        let wrong = provider.sign_in("ana@example.com", "secret2").await.unwrap_err();
        let unknown = provider.sign_in("bob@example.com", "secret1").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_short_password_and_bad_email() {
        let (store, provider) = provider();
        let err = provider.sign_up("ana@example.com", "abc").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Password should be at least 6 characters"
        );

        let err = provider.sign_up("not-an-email", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_stored_account_hides_password() {
        let (store, provider) = provider();
        provider.sign_up("ana@example.com", "secret1").await.unwrap();

        let doc = store.read(&account_path("ana@example.com").unwrap()).await.unwrap().unwrap();
        let text = doc.to_string();
        assert!(!text.contains("secret1"));
        assert_eq!(doc["passwordHash"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (store, provider) = provider();
        provider.sign_up("ana@example.com", "secret1").await.unwrap();
        provider.send_password_reset("ana@example.com").await.unwrap();

        let token = store
            .paths()
            .await
            .into_iter()
            .find_map(|p| p.strip_prefix("password_resets/").map(str::to_string))
            .unwrap();

        provider.complete_password_reset(&token, "newpass1").await.unwrap();
        assert!(provider.sign_in("ana@example.com", "secret1").await.is_err());
        assert!(provider.sign_in("ana@example.com", "newpass1").await.is_ok());

        // Tokens are single-use
        let err = provider.complete_password_reset(&token, "another1").await.unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_password_matches_only_exact_hash() {
        let account = AccountDocument {
            uid: "u1".to_string(),
            email: "ana@example.com".to_string(),
            salt: "00ff".to_string(),
            password_hash: hash_password("00ff", "secret1"),
            created_at: Utc::now(),
        };
        assert!(password_matches(&account, "secret1"));
        assert!(!password_matches(&account, "secret2"));
        assert!(!password_matches(&account, ""));

        let truncated = AccountDocument {
            password_hash: account.password_hash[..10].to_string(),
            ..account.clone()
        };
        assert!(!password_matches(&truncated, "secret1"));
    }

    #[tokio::test]
    async fn test_reset_token_must_be_a_single_key() {
        let (_, provider) = provider();
        for token in ["", "a/b", "../accounts", "tok?auth=x"] {
            let err = provider.complete_password_reset(token, "newpass1").await.unwrap_err();
            assert!(matches!(err, AppError::Authentication(_)), "{token}");
        }
    }

    #[tokio::test]
    async fn test_password_reset_unknown_email() {
        let (_, provider) = provider();
        let err = provider.send_password_reset("nobody@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
