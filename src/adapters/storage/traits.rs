//! Document store abstraction
//!
//! This module defines the trait that storage backends must implement.
//! The model is a keyed JSON tree: every document is addressed by a
//! [`DocumentPath`] and written or read as a whole.

use crate::domain::errors::StorageError;
use crate::domain::ids::DocumentPath;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Result type for storage operations
pub type StoreResult<T> = std::result::Result<T, StorageError>;

/// Keyed document store
///
/// Writes are full replacements and must be atomic: a reader never observes
/// a partially written document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs ("memory", "file", ...)
    fn backend_name(&self) -> &'static str;

    /// Test that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> StoreResult<()>;

    /// Replace the document at `path` with `value`
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected; nothing is written in that case.
    async fn write(&self, path: &DocumentPath, value: Value) -> StoreResult<()>;

    /// Read the document at `path`
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    async fn read(&self, path: &DocumentPath) -> StoreResult<Option<Value>>;

    /// Shallow-merge `fields` into the object at `path`
    ///
    /// Creates the document when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotAnObject`] when the stored value is not an object.
    async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> StoreResult<()>;

    /// Remove the document at `path`; removing a missing document is not an error
    async fn delete(&self, path: &DocumentPath) -> StoreResult<()>;
}

/// Serialize `value` and write it to `path`
pub async fn write_document<T>(
    store: &dyn DocumentStore,
    path: &DocumentPath,
    value: &T,
) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value).map_err(|e| StorageError::WriteFailed {
        path: path.to_string(),
        message: format!("serialization failed: {e}"),
    })?;
    store.write(path, json).await
}

/// Read the document at `path` and deserialize it
pub async fn read_document<T>(store: &dyn DocumentStore, path: &DocumentPath) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
{
    match store.read(path).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::InvalidFormat(format!("{path}: {e}"))),
        None => Ok(None),
    }
}

/// Merge `fields` into an existing JSON value
///
/// Shared by the backends that implement `update` as read-modify-write.
pub(crate) fn merge_fields(
    path: &DocumentPath,
    existing: Option<Value>,
    fields: Map<String, Value>,
) -> StoreResult<Value> {
    match existing {
        None | Some(Value::Null) => Ok(Value::Object(fields)),
        Some(Value::Object(mut current)) => {
            current.extend(fields);
            Ok(Value::Object(current))
        }
        Some(_) => Err(StorageError::NotAnObject(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path() -> DocumentPath {
        DocumentPath::new("users/u1").unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_into_missing_document() {
        let merged = merge_fields(&path(), None, fields(json!({"height": "180"}))).unwrap();
        assert_eq!(merged, json!({"height": "180"}));
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let existing = json!({"email": "a@b.c", "height": "170"});
        let merged =
            merge_fields(&path(), Some(existing), fields(json!({"height": "180"}))).unwrap();
        assert_eq!(merged, json!({"email": "a@b.c", "height": "180"}));
    }

    #[test]
    fn test_merge_rejects_non_object() {
        let result = merge_fields(&path(), Some(json!([1, 2])), Map::new());
        assert!(matches!(result, Err(StorageError::NotAnObject(_))));
    }
}
