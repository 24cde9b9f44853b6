//! Dark mode command implementation

use super::{load_or_report, report_failure};
use crate::core::preferences::PreferenceStore;
use clap::{Args, Subcommand};

/// Arguments for the dark-mode command
#[derive(Args, Debug)]
pub struct DarkModeArgs {
    #[command(subcommand)]
    pub action: DarkModeAction,
}

/// Dark mode operations
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkModeAction {
    /// Print the current setting
    Show,
    /// Enable dark mode
    On,
    /// Disable dark mode
    Off,
    /// Flip the current setting
    Toggle,
}

impl DarkModeArgs {
    /// Execute the dark-mode command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let preferences = PreferenceStore::from_config(&config.preferences).await;

        let result = match self.action {
            DarkModeAction::Show => Ok(preferences.dark_mode()),
            DarkModeAction::On => preferences.set_dark_mode(true).await.map(|_| true),
            DarkModeAction::Off => preferences.set_dark_mode(false).await.map(|_| false),
            DarkModeAction::Toggle => preferences.toggle_dark_mode().await,
        };

        match result {
            Ok(enabled) => {
                println!("Dark mode: {}", if enabled { "on" } else { "off" });
                Ok(0)
            }
            Err(e) => Ok(report_failure("Failed to save preferences", &e)),
        }
    }
}
