//! Validate config command implementation

use super::{load_or_report, report_failure};
use crate::adapters::storage::create_document_store;
use crate::config::connection_target;
use crate::config::schema::StorageBackend;
use crate::domain::AppError;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the storage backend is reachable
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Storage Backend: {}", config.storage.backend);

        match config.storage.backend {
            StorageBackend::Memory => {
                println!("  ⚠️  Documents are lost when the process exits");
            }
            StorageBackend::File => {
                if let Some(ref file) = config.storage.file {
                    println!("  Data Directory: {}", file.root.display());
                }
            }
            StorageBackend::Firebase => {
                if let Some(ref firebase) = config.storage.firebase {
                    println!("  Database URL: {}", firebase.database_url);
                    println!(
                        "  Auth Token: {}",
                        if firebase.auth_token.is_some() { "set" } else { "not set" }
                    );
                }
            }
            StorageBackend::PostgreSQL => {
                if let Some(ref pg) = config.storage.postgresql {
                    println!(
                        "  PostgreSQL Host: {}",
                        connection_target(&pg.connection_string)
                    );
                    println!("  Max Connections: {}", pg.max_connections);
                }
            }
        }
        println!("  Min Password Length: {}", config.identity.min_password_length);
        match config.preferences.path {
            Some(ref path) => println!("  Preferences File: {}", path.display()),
            None => println!("  Preferences File: (in memory)"),
        }
        println!();

        if !self.check_connection {
            return Ok(0);
        }

        let store = match create_document_store(&config) {
            Ok(store) => store,
            Err(e) => return Ok(report_failure("Failed to create document store", &e)),
        };
        match store.test_connection().await {
            Ok(()) => {
                println!("✅ Storage backend '{}' is reachable", store.backend_name());
                Ok(0)
            }
            Err(e) => Ok(report_failure(
                "Storage backend is unreachable",
                &AppError::Storage(e),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {
            check_connection: false,
        };
        assert_eq!(args.execute("missing-behealthy.toml").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_validate_postgresql_summary() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[storage]\nbackend = \"postgresql\"\n\n[storage.postgresql]\nconnection_string = \"postgresql://app:pw@localhost:5432/behealthy\"\n"
        )
        .unwrap();

        let args = ValidateArgs {
            check_connection: false,
        };
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(args.execute(&path).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_validate_file_backend_with_connection_check() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[storage]\nbackend = \"file\"\n\n[storage.file]\nroot = \"{}\"\n",
            dir.path().join("data").display()
        )
        .unwrap();

        let args = ValidateArgs {
            check_connection: true,
        };
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(args.execute(&path).await.unwrap(), 0);
    }
}
