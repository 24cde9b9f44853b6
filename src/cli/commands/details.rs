//! Details commands: details and edit-details

use super::{report_failure, AppContext, Credentials};
use crate::core::details::load_details;
use crate::core::profile::ProfileService;
use crate::log_command_start;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the details command
#[derive(Args, Debug)]
pub struct DetailsArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Write the plain text report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl DetailsArgs {
    /// Execute the details command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("details", ctx.config.storage.backend);

        let user = match self.credentials.sign_in(&ctx).await {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };

        let view = match load_details(ctx.store.clone(), &user.uid, &user.email).await {
            Ok(Some(view)) => view,
            Ok(None) => {
                println!("No details saved yet. Use `behealthy edit-details` to add them.");
                return Ok(0);
            }
            Err(e) => return Ok(report_failure("Error fetching user details", &e)),
        };

        let report = view.render_report();
        match self.report {
            Some(ref path) => {
                tokio::fs::write(path, &report).await?;
                println!("✅ Report written to {}", path.display());
            }
            None => print!("{report}"),
        }
        Ok(0)
    }
}

/// Arguments for the edit-details command
///
/// Omitted fields keep their stored value.
#[derive(Args, Debug)]
pub struct EditDetailsArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Height in centimetres
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<f64>,

    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub gender: Option<String>,
}

impl EditDetailsArgs {
    /// Execute the edit-details command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("edit-details", ctx.config.storage.backend);

        let user = match self.credentials.sign_in(&ctx).await {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };

        let profiles = ProfileService::new(ctx.store.clone());
        let mut profile = match profiles.load(&user.uid).await {
            Ok(profile) => profile.unwrap_or_default(),
            Err(e) => return Ok(report_failure("Error fetching user details", &e)),
        };

        if self.height.is_some() {
            profile.height = self.height;
        }
        if self.weight.is_some() {
            profile.weight = self.weight;
        }
        if self.age.is_some() {
            profile.age = self.age;
        }
        if self.gender.is_some() {
            profile.gender = self.gender.clone();
        }

        match profiles.save(&user.uid, &profile).await {
            Ok(()) => {
                println!("✅ Details saved");
                Ok(0)
            }
            Err(e) => Ok(report_failure("Error saving user details", &e)),
        }
    }
}
