//! CLI command implementations
//!
//! Every command returns a process exit code:
//! `0` success, `1` rejected input, `2` configuration error,
//! `4` storage or connection error, `5` fatal error.

pub mod account;
pub mod details;
pub mod goals;
pub mod init;
pub mod preferences;
pub mod results;
pub mod validate;

use crate::adapters::identity::{AuthenticatedUser, IdentityProvider, LocalIdentityProvider};
use crate::adapters::storage::{create_document_store, DocumentStore};
use crate::config::{load_config, BeHealthyConfig};
use crate::domain::AppError;
use crate::log_error_with_context;
use clap::Args;
use std::sync::Arc;

/// Exit code for a failed operation
pub fn exit_code_for(error: &AppError) -> i32 {
    match error {
        AppError::Configuration(_) => 2,
        AppError::Storage(_) | AppError::GenerationFailure { .. } => 4,
        AppError::Validation(_)
        | AppError::Authentication(_)
        | AppError::EmailAlreadyInUse(_)
        | AppError::NotFound(_) => 1,
        _ => 5,
    }
}

/// Print a failure line and return its exit code
pub(crate) fn report_failure(context: &str, error: &AppError) -> i32 {
    log_error_with_context!(error, context);
    println!("❌ {context}");
    println!("   Error: {error}");
    exit_code_for(error)
}

/// Load the configuration file, printing the failure on error
pub(crate) fn load_or_report(config_path: &str) -> Result<BeHealthyConfig, i32> {
    load_config(config_path).map_err(|e| report_failure("Failed to load configuration", &e))
}

/// Store and identity provider built from the configuration
pub struct AppContext {
    pub config: BeHealthyConfig,
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<LocalIdentityProvider>,
}

impl AppContext {
    /// Load the configuration and open the configured store
    ///
    /// Returns the exit code to use when anything fails.
    pub async fn open(config_path: &str) -> Result<Self, i32> {
        let config = load_or_report(config_path)?;
        let store = create_document_store(&config)
            .map_err(|e| report_failure("Failed to create document store", &e))?;

        if let Err(e) = store.test_connection().await {
            return Err(report_failure(
                "Storage backend is unreachable",
                &AppError::Storage(e),
            ));
        }

        let identity = Arc::new(LocalIdentityProvider::new(store.clone(), &config.identity));
        Ok(Self {
            config,
            store,
            identity,
        })
    }
}

/// Credentials of the acting user
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// Account email
    #[arg(long, env = "BEHEALTHY_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(long, env = "BEHEALTHY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Credentials {
    /// Sign in, printing the failure on error
    pub(crate) async fn sign_in(&self, ctx: &AppContext) -> Result<AuthenticatedUser, i32> {
        ctx.identity
            .sign_in(&self.email, &self.password)
            .await
            .map_err(|e| report_failure("Sign in failed", &e))
    }
}
