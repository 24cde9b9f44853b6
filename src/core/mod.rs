//! Core business logic for Be Healthy.
//!
//! # Modules
//!
//! - [`generator`] - Synthetic test history for new accounts
//! - [`metrics`] - BMI and blood test chart series
//! - [`accounts`] - Sign-up orchestration and credential delegation
//! - [`profile`] - Validated profile edits
//! - [`results`] - Test results view model
//! - [`details`] - Profile details view model and report
//! - [`goals`] - Goal list management
//! - [`preferences`] - Process-wide UI preferences
//!
//! # Sign-up Workflow
//!
//! 1. **Confirm**: Reject mismatched passwords before touching storage
//! 2. **Identity**: Create the account with the identity provider
//! 3. **User document**: Write `users/{uid}` with email and creation time
//! 4. **Provision**: Generate and write the test history once
//!
//! # Example
//!
//! ```rust,no_run
//! use behealthy::adapters::identity::LocalIdentityProvider;
//! use behealthy::adapters::storage::MemoryStore;
//! use behealthy::config::IdentityConfig;
//! use behealthy::core::accounts::AccountService;
//! use behealthy::core::generator::RecordGenerator;
//! use behealthy::core::results::{load_test_results, ResultsView};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let identity = Arc::new(LocalIdentityProvider::new(store.clone(), &IdentityConfig::default()));
//! let accounts = AccountService::new(identity, store.clone(), RecordGenerator::system());
//!
//! let outcome = accounts.sign_up("ana@example.com", "secret1", "secret1").await?;
//! if let ResultsView::Loaded { records, .. } = load_test_results(store.as_ref(), &outcome.user.uid).await? {
//!     println!("{} records", records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod details;
pub mod generator;
pub mod goals;
pub mod metrics;
pub mod preferences;
pub mod profile;
pub mod results;
