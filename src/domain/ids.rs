//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for user identifiers and storage paths.
//! Each type ensures type safety and validates its format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether `c` may appear in a store key
///
/// Keys end up as URL path segments, file names and Realtime Database keys,
/// so only characters that need no escaping in any of them are accepted.
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

/// User identifier newtype wrapper
///
/// Opaque, stable identifier handed out by the identity provider.
/// It scopes every document the user owns.
///
/// # Examples
///
/// ```
/// use behealthy::domain::ids::UserId;
/// use std::str::FromStr;
///
/// let user_id = UserId::from_str("f3a9c2e4b1d84e0f9a7c6b5d4e3f2a1b").unwrap();
/// assert_eq!(user_id.as_str(), "f3a9c2e4b1d84e0f9a7c6b5d4e3f2a1b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(UserId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        if !is_valid_key(&id) {
            return Err(format!(
                "User ID '{id}' may only contain ASCII letters, digits, '-' and '_'"
            ));
        }
        Ok(Self(id))
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Slash-separated path of a document in the keyed store
///
/// Paths are relative (no leading or trailing slash) and every segment must be
/// a valid key.
///
/// # Examples
///
/// ```
/// use behealthy::domain::ids::{DocumentPath, UserId};
///
/// let uid = UserId::new("abc123").unwrap();
/// let path = DocumentPath::test_results(&uid);
/// assert_eq!(path.as_str(), "testresults/abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Creates a new DocumentPath, validating every segment
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err("Document path cannot be empty".to_string());
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(format!("Document path '{path}' contains an empty segment"));
            }
            if !is_valid_key(segment) {
                return Err(format!(
                    "Document path segment '{segment}' contains a forbidden character"
                ));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Generated test results of a user
    pub fn test_results(user_id: &UserId) -> Self {
        Self(format!("testresults/{user_id}"))
    }

    /// Profile document of a user
    pub fn user_profile(user_id: &UserId) -> Self {
        Self(format!("users/{user_id}"))
    }

    /// Goals document of a user
    pub fn goals(user_id: &UserId) -> Self {
        Self(format!("goals/{user_id}"))
    }

    /// Appends one child segment
    ///
    /// `segment` must be a single non-empty key; slashes are rejected rather
    /// than read as nested segments.
    pub fn child(&self, segment: &str) -> Result<Self, String> {
        if !is_valid_key(segment) {
            return Err(format!("Invalid document key '{segment}'"));
        }
        Ok(Self(format!("{}/{}", self.0, segment)))
    }

    /// Iterates over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for DocumentPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
