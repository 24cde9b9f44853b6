//! Local filesystem document store
//!
//! Each document is one pretty-printed JSON file under a root directory:
//! `testresults/abc` is stored at `{root}/testresults/abc.json`.
//! Writes go to a temporary sibling file that is renamed over the target,
//! so readers see either the old or the new document.

use super::traits::{merge_fields, DocumentStore, StoreResult};
use crate::config::schema::FileStoreConfig;
use crate::domain::errors::StorageError;
use crate::domain::ids::DocumentPath;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Document store writing JSON files
pub struct FileStore {
    root: PathBuf,

    /// Serializes read-modify-write updates within this process
    update_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store rooted at `root`
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            update_lock: Mutex::new(()),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &FileStoreConfig) -> Self {
        Self::new(&config.root)
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, path: &DocumentPath) -> PathBuf {
        let mut file = self.root.clone();
        for segment in path.segments() {
            file.push(segment);
        }
        file.set_extension("json");
        file
    }

    async fn read_file(&self, path: &DocumentPath) -> StoreResult<Option<Value>> {
        let file = self.file_for(path);
        let contents = match fs::read(&file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|e| StorageError::InvalidFormat(format!("{}: {e}", file.display())))
    }

    async fn write_file(&self, path: &DocumentPath, value: &Value) -> StoreResult<()> {
        let write_failed = |message: String| StorageError::WriteFailed {
            path: path.to_string(),
            message,
        };

        let file = self.file_for(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(format!("cannot create {}: {e}", parent.display())))?;
        }

        let body = serde_json::to_vec_pretty(value).map_err(|e| write_failed(e.to_string()))?;
        let staging = file.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4().simple()));

        fs::write(&staging, body)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        if let Err(e) = fs::rename(&staging, &file).await {
            let _ = fs::remove_file(&staging).await;
            return Err(write_failed(e.to_string()));
        }

        Ok(())
    }

    async fn remove_file(&self, path: &DocumentPath) -> StoreResult<()> {
        match fs::remove_file(self.file_for(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            StorageError::ConnectionFailed(format!(
                "cannot use data directory {}: {e}",
                self.root.display()
            ))
        })?;

        tracing::debug!(root = %self.root.display(), "File store is writable");
        Ok(())
    }

    async fn write(&self, path: &DocumentPath, value: Value) -> StoreResult<()> {
        if value.is_null() {
            return self.remove_file(path).await;
        }
        self.write_file(path, &value).await
    }

    async fn read(&self, path: &DocumentPath) -> StoreResult<Option<Value>> {
        self.read_file(path).await
    }

    async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> StoreResult<()> {
        let _guard = self.update_lock.lock().await;
        let existing = self.read_file(path).await?;
        let merged = merge_fields(path, existing, fields)?;
        self.write_file(path, &merged).await
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.remove_file(path).await
    }
}
