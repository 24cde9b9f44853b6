//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BeHealthyConfig;
use crate::config::secret_string;
use crate::domain::errors::AppError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BeHealthyConfig
/// 4. Applies environment variable overrides (BEHEALTHY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use behealthy::config::loader::load_config;
///
/// let config = load_config("behealthy.toml").expect("Failed to load config");
/// println!("Storage backend: {}", config.storage.backend);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BeHealthyConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Runs the same substitution, override and validation steps as [`load_config`].
///
/// # Errors
///
/// Returns an error if parsing, substitution or validation fails.
pub fn parse_config(contents: &str) -> Result<BeHealthyConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: BeHealthyConfig = toml::from_str(&contents)
        .map_err(|e| AppError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AppError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AppError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using BEHEALTHY_* prefix
///
/// Environment variables follow the pattern: BEHEALTHY_<SECTION>_<KEY>
/// For example: BEHEALTHY_STORAGE_BACKEND, BEHEALTHY_FIREBASE_AUTH_TOKEN
fn apply_env_overrides(config: &mut BeHealthyConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("BEHEALTHY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("BEHEALTHY_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => super::schema::Environment::Development,
            "staging" => super::schema::Environment::Staging,
            "production" => super::schema::Environment::Production,
            other => {
                return Err(AppError::Configuration(format!(
                    "Invalid BEHEALTHY_ENVIRONMENT '{other}'"
                )))
            }
        };
    }

    // Storage overrides
    if let Ok(val) = std::env::var("BEHEALTHY_STORAGE_BACKEND") {
        config.storage.backend = val.parse().map_err(AppError::Configuration)?;
    }

    if let Some(ref mut file_config) = config.storage.file {
        if let Ok(val) = std::env::var("BEHEALTHY_FILE_ROOT") {
            file_config.root = val.into();
        }
    }

    // Firebase overrides (only if Firebase is configured)
    if let Some(ref mut firebase_config) = config.storage.firebase {
        if let Ok(val) = std::env::var("BEHEALTHY_FIREBASE_DATABASE_URL") {
            firebase_config.database_url = val;
        }
        if let Ok(val) = std::env::var("BEHEALTHY_FIREBASE_AUTH_TOKEN") {
            firebase_config.auth_token = Some(secret_string(val));
        }
        if let Ok(val) = std::env::var("BEHEALTHY_FIREBASE_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                firebase_config.timeout_seconds = timeout;
            }
        }
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.storage.postgresql {
        if let Ok(val) = std::env::var("BEHEALTHY_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("BEHEALTHY_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
    }

    // Identity overrides
    if let Ok(val) = std::env::var("BEHEALTHY_IDENTITY_MIN_PASSWORD_LENGTH") {
        if let Ok(len) = val.parse() {
            config.identity.min_password_length = len;
        }
    }

    // Preference overrides
    if let Ok(val) = std::env::var("BEHEALTHY_PREFERENCES_PATH") {
        config.preferences.path = Some(val.into());
    }

    // Logging overrides
    if let Ok(val) = std::env::var("BEHEALTHY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("BEHEALTHY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("BEHEALTHY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
