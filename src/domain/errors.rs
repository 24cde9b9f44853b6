//! Domain error types
//!
//! This module defines the error hierarchy for Be Healthy.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main application error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The generated test results could not be persisted
    #[error("Failed to generate test results for user {user_id}: {source}")]
    GenerationFailure {
        user_id: String,
        #[source]
        source: StorageError,
    },

    /// A blood test record lacks a parameter required for charting
    #[error("Blood test dated {record_date} has no '{parameter}' parameter")]
    MissingParameter {
        record_date: String,
        parameter: String,
    },

    /// A parameter expected to be numeric could not be parsed
    #[error("Parameter '{parameter}' has non-numeric value '{value}'")]
    InvalidParameterValue { parameter: String, value: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Sign-up attempted with an email that already has an account
    #[error("This email is already registered. Please log in or reset your password.")]
    EmailAlreadyInUse(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Document store errors
///
/// Errors raised by the storage backends.
/// These errors don't expose HTTP or database client types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to reach the backend
    #[error("Failed to connect to storage backend: {0}")]
    ConnectionFailed(String),

    /// The backend rejected the credentials
    #[error("Storage authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Path is empty or contains forbidden segments
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    /// Failed to write a document
    #[error("Failed to write document at {path}: {message}")]
    WriteFailed { path: String, message: String },

    /// Failed to read a document
    #[error("Failed to read document at {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// Merge update targeted a non-object value
    #[error("Cannot merge fields into non-object document at {0}")]
    NotAnObject(String),

    /// Stored or returned document did not have the expected shape
    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Configuration(format!("TOML parse error: {err}"))
    }
}
