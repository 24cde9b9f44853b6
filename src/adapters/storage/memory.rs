//! In-process document store
//!
//! Keeps documents in a map guarded by a lock. Used for tests and for
//! trying the CLI without any persistence.

use super::traits::{merge_fields, DocumentStore, StoreResult};
use crate::domain::ids::DocumentPath;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Document store backed by a `BTreeMap`
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Paths of all stored documents, sorted
    pub async fn paths(&self) -> Vec<String> {
        self.documents.read().await.keys().cloned().collect()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn write(&self, path: &DocumentPath, value: Value) -> StoreResult<()> {
        let mut documents = self.documents.write().await;
        if value.is_null() {
            documents.remove(path.as_str());
        } else {
            documents.insert(path.to_string(), value);
        }
        Ok(())
    }

    async fn read(&self, path: &DocumentPath) -> StoreResult<Option<Value>> {
        Ok(self.documents.read().await.get(path.as_str()).cloned())
    }

    async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> StoreResult<()> {
        // Hold the write lock across read-modify-write
        let mut documents = self.documents.write().await;
        let merged = merge_fields(path, documents.get(path.as_str()).cloned(), fields)?;
        documents.insert(path.to_string(), merged);
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.documents.write().await.remove(path.as_str());
        Ok(())
    }
}
