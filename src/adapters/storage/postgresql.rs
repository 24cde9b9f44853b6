//! PostgreSQL document store
//!
//! Documents live in a single `documents` table keyed by path with a JSONB
//! body. Every operation is one statement, so writes are atomic.

use super::traits::{DocumentStore, StoreResult};
use crate::config::schema::PostgreSQLConfig;
use crate::domain::errors::StorageError;
use crate::domain::ids::DocumentPath;
use crate::domain::{AppError, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio_postgres::NoTls;

const SCHEMA_SQL: &str = include_str!("../../../migrations/001_documents.sql");

const UPSERT_SQL: &str = r#"
    INSERT INTO documents (path, body, updated_at)
    VALUES ($1, $2, now())
    ON CONFLICT (path) DO UPDATE SET
        body = EXCLUDED.body,
        updated_at = EXCLUDED.updated_at
"#;

const MERGE_SQL: &str = r#"
    INSERT INTO documents (path, body, updated_at)
    VALUES ($1, $2, now())
    ON CONFLICT (path) DO UPDATE SET
        body = documents.body || EXCLUDED.body,
        updated_at = EXCLUDED.updated_at
    WHERE jsonb_typeof(documents.body) = 'object'
"#;

const SELECT_SQL: &str = "SELECT body FROM documents WHERE path = $1";

const DELETE_SQL: &str = "DELETE FROM documents WHERE path = $1";

/// Document store backed by a PostgreSQL connection pool
pub struct PostgreSQLStore {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLStore {
    /// Create a new store and its connection pool
    ///
    /// No connection is opened until the first operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool cannot be built.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_str()
            .parse()
            .map_err(|e| {
                AppError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| {
                AppError::Configuration(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self { pool, config })
    }

    /// Create the `documents` table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let client = self.connection().await?;
        client
            .batch_execute(SCHEMA_SQL)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("Failed to execute migration: {e}")))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    async fn connection(&self) -> StoreResult<deadpool_postgres::Object> {
        let client = self.pool.get().await.map_err(|e| {
            StorageError::ConnectionFailed(format!("Failed to get connection from pool: {e}"))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .batch_execute(&timeout_query)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("Failed to set statement timeout: {e}")))?;

        Ok(client)
    }
}

#[async_trait]
impl DocumentStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        let client = self.connection().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        self.ensure_schema().await?;
        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    async fn write(&self, path: &DocumentPath, value: Value) -> StoreResult<()> {
        if value.is_null() {
            return self.delete(path).await;
        }

        let client = self.connection().await?;
        client
            .execute(UPSERT_SQL, &[&path.as_str(), &value])
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn read(&self, path: &DocumentPath) -> StoreResult<Option<Value>> {
        let client = self.connection().await?;
        let row = client
            .query_opt(SELECT_SQL, &[&path.as_str()])
            .await
            .map_err(|e| StorageError::ReadFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        row.map(|r| {
            r.try_get::<_, Value>(0)
                .map_err(|e| StorageError::InvalidFormat(format!("{path}: {e}")))
        })
        .transpose()
    }

    async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> StoreResult<()> {
        let client = self.connection().await?;
        let affected = client
            .execute(MERGE_SQL, &[&path.as_str(), &Value::Object(fields)])
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        // The WHERE clause skips non-object bodies
        if affected == 0 {
            return Err(StorageError::NotAnObject(path.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        let client = self.connection().await?;
        client
            .execute(DELETE_SQL, &[&path.as_str()])
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
