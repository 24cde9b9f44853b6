//! External system integrations for Be Healthy.
//!
//! This module provides adapters for the systems the core talks to:
//!
//! - [`storage`] - Keyed JSON document stores (memory, file, Firebase, PostgreSQL)
//! - [`identity`] - Account creation and credential checks
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`storage::DocumentStore`], [`identity::IdentityProvider`]) so the core
//! services can be tested against the in-memory store.
//!
//! ```rust,no_run
//! use behealthy::adapters::storage::{DocumentStore, FirebaseStore};
//! use behealthy::config::{secret_string_opt, FirebaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FirebaseConfig {
//!     database_url: "https://be-healthy-default-rtdb.firebaseio.com".to_string(),
//!     auth_token: secret_string_opt(Some("database-secret".to_string())),
//!     timeout_seconds: 30,
//! };
//!
//! let store = FirebaseStore::new(config)?;
//! store.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod identity;
pub mod storage;
