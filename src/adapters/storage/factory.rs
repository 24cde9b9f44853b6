//! Document store factory
//!
//! This module creates the configured storage backend.

use crate::adapters::storage::file::FileStore;
use crate::adapters::storage::firebase::FirebaseStore;
use crate::adapters::storage::memory::MemoryStore;
use crate::adapters::storage::postgresql::PostgreSQLStore;
use crate::adapters::storage::traits::DocumentStore;
use crate::config::schema::{BeHealthyConfig, StorageBackend};
use crate::domain::{AppError, Result};
use std::sync::Arc;

/// Create a document store based on the configuration
///
/// This factory function examines `storage.backend` and builds the matching
/// implementation. No network connection is opened here; call
/// [`DocumentStore::test_connection`] to verify reachability.
///
/// # Errors
///
/// Returns a configuration error if the selected backend has no settings
/// section or its settings are invalid.
pub fn create_document_store(config: &BeHealthyConfig) -> Result<Arc<dyn DocumentStore>> {
    let storage = &config.storage;
    match storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let file_config = storage.file.as_ref().ok_or_else(|| {
                AppError::Configuration("storage.file section is required".to_string())
            })?;

            tracing::info!(root = %file_config.root.display(), "Creating file document store");
            Ok(Arc::new(FileStore::from_config(file_config)))
        }
        StorageBackend::Firebase => {
            let firebase_config = storage.firebase.as_ref().ok_or_else(|| {
                AppError::Configuration("storage.firebase section is required".to_string())
            })?;

            tracing::info!(url = %firebase_config.database_url, "Creating Firebase document store");
            Ok(Arc::new(FirebaseStore::new(firebase_config.clone())?))
        }
        StorageBackend::PostgreSQL => {
            let pg_config = storage.postgresql.as_ref().ok_or_else(|| {
                AppError::Configuration("storage.postgresql section is required".to_string())
            })?;

            tracing::info!("Creating PostgreSQL document store");
            Ok(Arc::new(PostgreSQLStore::new(pg_config.clone())?))
        }
    }
}
