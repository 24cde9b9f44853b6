//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - JSON-formatted file logs with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use behealthy::logging::init_logging;
//! use behealthy::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a CLI command
///
/// # Example
///
/// ```no_run
/// use behealthy::log_command_start;
///
/// log_command_start!("results", "memory");
/// ```
#[macro_export]
macro_rules! log_command_start {
    ($command:expr, $backend:expr) => {
        tracing::info!(command = $command, backend = %$backend, "Starting command");
    };
}

/// Log a freshly written test history
///
/// # Example
///
/// ```no_run
/// use behealthy::log_results_provisioned;
/// use behealthy::domain::UserId;
///
/// let uid = UserId::new("u1").unwrap();
/// log_results_provisioned!(&uid, 12, "file");
/// ```
#[macro_export]
macro_rules! log_results_provisioned {
    ($user_id:expr, $count:expr, $backend:expr) => {
        tracing::info!(
            user_id = %$user_id,
            records = $count,
            backend = $backend,
            "Test results saved"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use behealthy::log_error_with_context;
/// use behealthy::domain::AppError;
///
/// let error = AppError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
