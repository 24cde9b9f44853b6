//! Firebase Realtime Database document store
//!
//! Talks to the database REST API: every document path maps to
//! `{database_url}/{path}.json`. `PUT` replaces, `PATCH` merges, `GET`
//! returns `null` for missing data and `DELETE` removes a subtree.

use super::traits::{DocumentStore, StoreResult};
use crate::config::schema::FirebaseConfig;
use crate::domain::errors::StorageError;
use crate::domain::ids::DocumentPath;
use crate::domain::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Realtime Database REST client
pub struct FirebaseStore {
    /// Database root, always ending in `/`
    base_url: Url,

    /// HTTP client for making requests
    client: Client,

    /// Database secret or ID token appended as `?auth=`
    config: FirebaseConfig,
}

impl FirebaseStore {
    /// Create a new store from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: FirebaseConfig) -> Result<Self> {
        let mut base = config.database_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::Configuration(format!(
                "Invalid firebase database_url '{}': {e}",
                config.database_url
            ))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Database root URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn document_url(&self, path: &DocumentPath) -> StoreResult<Url> {
        let mut segments: Vec<String> = path.segments().map(str::to_string).collect();
        if let Some(last) = segments.last_mut() {
            last.push_str(".json");
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StorageError::InvalidPath(format!("{path}: database URL cannot hold a path"))
            })?
            .pop_if_empty()
            .extend(&segments);

        if let Some(ref token) = self.config.auth_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret().as_str());
        }

        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &DocumentPath,
        body: Option<&Value>,
    ) -> StoreResult<Response> {
        let url = self.document_url(path)?;

        tracing::debug!(method = %method, path = %path, "Firebase request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        check_status(response).await
    }
}

/// Map non-success statuses to storage errors
async fn check_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StorageError::AuthenticationFailed(message)
        }
        s if s.is_server_error() => StorageError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => StorageError::ClientError {
            status: s.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl DocumentStore for FirebaseStore {
    fn backend_name(&self) -> &'static str {
        "firebase"
    }

    async fn test_connection(&self) -> StoreResult<()> {
        // Shallow read of the root only lists keys
        let mut url = self
            .base_url
            .join(".json")
            .map_err(|e| StorageError::InvalidPath(e.to_string()))?;
        url.query_pairs_mut().append_pair("shallow", "true");
        if let Some(ref token) = self.config.auth_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret().as_str());
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;
        check_status(response).await?;

        tracing::info!(base_url = %self.base_url, "Firebase connection test successful");
        Ok(())
    }

    async fn write(&self, path: &DocumentPath, value: Value) -> StoreResult<()> {
        self.send(Method::PUT, path, Some(&value))
            .await
            .map_err(|e| match e {
                StorageError::ConnectionFailed(message) => StorageError::WriteFailed {
                    path: path.to_string(),
                    message,
                },
                other => other,
            })?;
        Ok(())
    }

    async fn read(&self, path: &DocumentPath) -> StoreResult<Option<Value>> {
        let response = self.send(Method::GET, path, None).await?;
        let value: Value = response.json().await.map_err(|e| StorageError::ReadFailed {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Ok((!value.is_null()).then_some(value))
    }

    async fn update(&self, path: &DocumentPath, fields: Map<String, Value>) -> StoreResult<()> {
        if let Some(existing) = self.read(path).await? {
            if !existing.is_object() {
                return Err(StorageError::NotAnObject(path.to_string()));
            }
        }
        self.send(Method::PATCH, path, Some(&Value::Object(fields)))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
