//! Storage credentials kept out of logs
//!
//! Be Healthy holds two kinds of secret: the Firebase `auth` token and the
//! PostgreSQL connection string, which embeds the database password. Both are
//! wrapped in [`SecretString`] as soon as they are parsed. The wrapper prints
//! as `[REDACTED]` and the buffer is zeroed on drop; reading the value needs
//! an explicit `expose_secret()`.
//!
//! ```rust
//! use behealthy::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("database-secret".to_string());
//! assert_eq!(token.expose_secret().as_str(), "database-secret");
//! assert!(!format!("{token:?}").contains("database-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Credential text, zeroed on drop
///
/// Has no `Display` impl and its `Debug` output is redacted; callers go
/// through [`SecretValue::as_str`].
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

// Needed by the `Serialize` derive on the configuration schema
impl SerializableSecret for SecretValue {}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl SecretValue {
    /// Raw credential text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        SecretValue(value)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret-wrapped credential
pub type SecretString = Secret<SecretValue>;

/// Wrap a credential read from configuration or the environment
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Wrap an optional credential, such as a Firebase token that may be absent
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

/// Host part of a connection string, safe to print
///
/// `postgresql://user:pw@db:5432/app` gives `db:5432/app`. Strings without
/// credentials are returned unchanged; anything unparsable prints as `***`.
pub fn connection_target(connection_string: &SecretString) -> String {
    use secrecy::ExposeSecret;

    let raw = connection_string.expose_secret().as_str();
    match raw.split_once("://") {
        Some((_, rest)) => rest.rsplit('@').next().unwrap_or("***").to_string(),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_connection_string_is_redacted_in_debug() {
        let secret = secret_string("postgresql://app:hunter2@db/behealthy".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!format!("{:?}", secret.expose_secret()).contains("hunter2"));
    }

    #[test]
    fn test_missing_firebase_token_stays_none() {
        assert!(secret_string_opt(None).is_none());

        let token = secret_string_opt(Some("firebase-token".to_string())).unwrap();
        assert_eq!(token.expose_secret(), "firebase-token");
    }

    #[test]
    fn test_connection_target_hides_credentials() {
        let with_password = secret_string("postgresql://app:hunter2@db:5432/behealthy".to_string());
        assert_eq!(connection_target(&with_password), "db:5432/behealthy");

        let without = secret_string("postgres://localhost/behealthy".to_string());
        assert_eq!(connection_target(&without), "localhost/behealthy");

        let garbage = secret_string("hunter2".to_string());
        assert_eq!(connection_target(&garbage), "***");
    }

    #[test]
    fn test_token_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct FirebaseSection {
            auth_token: SecretString,
        }

        let section: FirebaseSection = toml::from_str(r#"auth_token = "abc123""#).unwrap();
        assert_eq!(section.auth_token.expose_secret().as_str(), "abc123");
    }
}
