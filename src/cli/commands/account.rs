//! Account commands: signup, login and reset-password

use super::{report_failure, AppContext, Credentials};
use crate::adapters::identity::IdentityProvider;
use crate::core::accounts::AccountService;
use crate::core::generator::RecordGenerator;
use crate::log_command_start;
use clap::Args;

/// Arguments for the signup command
#[derive(Args, Debug)]
pub struct SignupArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Password confirmation; must equal the password
    #[arg(long, env = "BEHEALTHY_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: String,
}

impl SignupArgs {
    /// Execute the signup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("signup", ctx.config.storage.backend);

        let service = AccountService::new(
            ctx.identity.clone(),
            ctx.store.clone(),
            RecordGenerator::system(),
        );

        match service
            .sign_up(
                &self.credentials.email,
                &self.credentials.password,
                &self.confirm_password,
            )
            .await
        {
            Ok(outcome) => {
                println!("✅ Account created for {}", outcome.user.email);
                println!("   User ID: {}", outcome.user.uid);
                println!("   Generated {} test results", outcome.generated_records);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Sign up failed", &e)),
        }
    }
}

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub credentials: Credentials,
}

impl LoginArgs {
    /// Execute the login command
    ///
    /// Checks the credentials and ends the session again.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("login", ctx.config.storage.backend);

        let user = match self.credentials.sign_in(&ctx).await {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };
        println!("✅ Signed in as {}", user.email);
        println!("   User ID: {}", user.uid);

        if let Err(e) = ctx.identity.sign_out(&user).await {
            return Ok(report_failure("Sign out failed", &e));
        }
        Ok(0)
    }
}

/// Arguments for the reset-password command
///
/// Without `--token` a reset is requested; with it the reset is completed.
#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Account email
    #[arg(long, env = "BEHEALTHY_EMAIL")]
    pub email: String,

    /// Token from a previous reset request
    #[arg(long, requires = "new_password")]
    pub token: Option<String>,

    /// New password, used together with --token
    #[arg(long, env = "BEHEALTHY_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: Option<String>,
}

impl ResetPasswordArgs {
    /// Execute the reset-password command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("reset-password", ctx.config.storage.backend);

        match (&self.token, &self.new_password) {
            (Some(token), Some(new_password)) => {
                match ctx
                    .identity
                    .complete_password_reset(token, new_password)
                    .await
                {
                    Ok(()) => {
                        println!("✅ Password updated. You can now log in.");
                        Ok(0)
                    }
                    Err(e) => Ok(report_failure("Password reset failed", &e)),
                }
            }
            _ => match ctx.identity.send_password_reset(&self.email).await {
                Ok(()) => {
                    println!("✅ Password reset requested for {}", self.email);
                    println!("   The reset token is written to the application log");
                    Ok(0)
                }
                Err(e) => Ok(report_failure("Password reset failed", &e)),
            },
        }
    }
}
