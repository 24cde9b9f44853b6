//! Identity provider abstraction

use crate::domain::ids::UserId;
use crate::domain::Result;
use async_trait::async_trait;

/// A user whose credentials were accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable user id, used in every document path
    pub uid: UserId,

    /// Normalized email address
    pub email: String,
}

/// Account and credential management
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short provider name used in logs
    fn provider_name(&self) -> &'static str;

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns `EmailAlreadyInUse` when the email has an account, or
    /// `Validation` when the email or password is rejected.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    /// Check credentials
    ///
    /// # Errors
    ///
    /// Returns `Authentication` when the email is unknown or the password is wrong.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    /// End the session of `user`
    async fn sign_out(&self, user: &AuthenticatedUser) -> Result<()>;

    /// Start a password reset for `email`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no account uses the email.
    async fn send_password_reset(&self, email: &str) -> Result<()>;
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal shape check: `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}
