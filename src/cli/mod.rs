//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Be Healthy using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Be Healthy - personal health tracking
#[derive(Parser, Debug)]
#[command(name = "behealthy")]
#[command(version, about, long_about = None)]
#[command(author = "Be Healthy Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "behealthy.toml", env = "BEHEALTHY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BEHEALTHY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Create an account and its initial test history
    Signup(commands::account::SignupArgs),

    /// Check account credentials
    Login(commands::account::LoginArgs),

    /// Request or complete a password reset
    ResetPassword(commands::account::ResetPasswordArgs),

    /// Show test results and blood test trends
    Results(commands::results::ResultsArgs),

    /// Show profile details and BMI
    Details(commands::details::DetailsArgs),

    /// Update height, weight, age or gender
    EditDetails(commands::details::EditDetailsArgs),

    /// Manage health goals
    Goals(commands::goals::GoalsArgs),

    /// Show or change the dark mode preference
    DarkMode(commands::preferences::DarkModeArgs),
}

impl Commands {
    /// Execute the command and return the process exit code
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Init(args) => args.execute().await,
            Commands::ValidateConfig(args) => args.execute(config_path).await,
            Commands::Signup(args) => args.execute(config_path).await,
            Commands::Login(args) => args.execute(config_path).await,
            Commands::ResetPassword(args) => args.execute(config_path).await,
            Commands::Results(args) => args.execute(config_path).await,
            Commands::Details(args) => args.execute(config_path).await,
            Commands::EditDetails(args) => args.execute(config_path).await,
            Commands::Goals(args) => args.execute(config_path).await,
            Commands::DarkMode(args) => args.execute(config_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::goals::GoalsAction;
    use commands::preferences::DarkModeAction;

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["behealthy", "init"]);
        assert_eq!(cli.config, "behealthy.toml");
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "behealthy",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_signup() {
        let cli = Cli::parse_from([
            "behealthy",
            "signup",
            "--email",
            "ana@example.com",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
        ]);
        match cli.command {
            Commands::Signup(args) => {
                assert_eq!(args.credentials.email, "ana@example.com");
                assert_eq!(args.confirm_password, "secret1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_goals_remove() {
        let cli = Cli::parse_from([
            "behealthy",
            "goals",
            "--email",
            "a@b.co",
            "--password",
            "secret1",
            "remove",
            "2",
        ]);
        match cli.command {
            Commands::Goals(args) => assert!(matches!(args.action, GoalsAction::Remove { position: 2 })),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_dark_mode() {
        let cli = Cli::parse_from(["behealthy", "dark-mode", "toggle"]);
        match cli.command {
            Commands::DarkMode(args) => assert_eq!(args.action, DarkModeAction::Toggle),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_reset_token_requires_new_password() {
        let result = Cli::try_parse_from([
            "behealthy",
            "reset-password",
            "--email",
            "a@b.co",
            "--token",
            "abc",
        ]);
        assert!(result.is_err());
    }
}
