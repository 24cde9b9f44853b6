//! Configuration management for Be Healthy.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Be Healthy uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `BEHEALTHY_*` environment overrides
//! - Default values for optional settings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use behealthy::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("behealthy.toml")?;
//!
//! println!("Storage backend: {}", config.storage.backend);
//! if let Some(firebase) = &config.storage.firebase {
//!     println!("Firebase: {}", firebase.database_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "firebase"
//!
//! [storage.firebase]
//! database_url = "https://be-healthy-default-rtdb.firebaseio.com"
//! auth_token = "${BEHEALTHY_FIREBASE_SECRET}"
//!
//! [preferences]
//! path = "./data/preferences.json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, BeHealthyConfig, Environment, FileStoreConfig, FirebaseConfig,
    IdentityConfig, LoggingConfig, PostgreSQLConfig, PreferencesConfig, StorageBackend,
    StorageConfig,
};
pub use secret::{connection_target, secret_string, secret_string_opt, SecretString, SecretValue};
