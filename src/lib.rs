// Be Healthy - Personal health tracking
// Copyright (c) 2025 Be Healthy Contributors
// Licensed under the MIT License

//! # Be Healthy
//!
//! Be Healthy lets users sign up, record personal metrics, review a generated
//! history of medical test results, track health goals and keep a local
//! display preference.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Generating** a synthetic test history for every new account
//! - **Deriving** BMI and blood test trend charts from stored data
//! - **Storing** profiles, goals and results in a keyed JSON document store
//! - **Managing** accounts through a pluggable identity provider
//!
//! ## Architecture
//!
//! Be Healthy follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Services and view models (accounts, results, details, goals)
//! - [`adapters`] - Document stores and identity providers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use behealthy::adapters::identity::LocalIdentityProvider;
//! use behealthy::adapters::storage::create_document_store;
//! use behealthy::config::load_config;
//! use behealthy::core::accounts::AccountService;
//! use behealthy::core::generator::RecordGenerator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("behealthy.toml")?;
//!     let store = create_document_store(&config)?;
//!     let identity = Arc::new(LocalIdentityProvider::new(store.clone(), &config.identity));
//!
//!     let accounts = AccountService::new(identity, store, RecordGenerator::system());
//!     let outcome = accounts.sign_up("ana@example.com", "secret1", "secret1").await?;
//!
//!     println!("Generated {} test results", outcome.generated_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Derived Metrics
//!
//! ```rust
//! use behealthy::core::metrics::{classify_bmi, compute_bmi, BmiCategory};
//!
//! let bmi = compute_bmi(180.0, 72.0).unwrap();
//! assert_eq!(bmi, 22.22);
//! assert_eq!(classify_bmi(bmi), BmiCategory::NormalWeight);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::AppError`]. Storage backends report [`domain::StorageError`],
//! which converts into `AppError` with the `?` operator.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
