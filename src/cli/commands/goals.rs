//! Goals command implementation

use super::{report_failure, AppContext, Credentials};
use crate::core::goals::GoalsService;
use crate::domain::GoalList;
use crate::log_command_start;
use clap::{Args, Subcommand};

/// Arguments for the goals command
#[derive(Args, Debug)]
pub struct GoalsArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub action: GoalsAction,
}

/// Goal list operations
#[derive(Subcommand, Debug)]
pub enum GoalsAction {
    /// Show the goal list
    List,

    /// Append a goal
    Add {
        /// Goal text; blank text is ignored
        goal: String,
    },

    /// Remove a goal by its position in `goals list`
    Remove {
        /// 1-based position
        position: usize,
    },
}

impl GoalsArgs {
    /// Execute the goals command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("goals", ctx.config.storage.backend);

        let user = match self.credentials.sign_in(&ctx).await {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };
        let service = GoalsService::new(ctx.store.clone());

        let result = match self.action {
            GoalsAction::List => service.list(&user.uid).await,
            GoalsAction::Add { ref goal } => service.add(&user.uid, goal).await,
            GoalsAction::Remove { position } => {
                let Some(index) = position.checked_sub(1) else {
                    println!("❌ Positions start at 1");
                    return Ok(1);
                };
                service.remove(&user.uid, index).await
            }
        };

        match result {
            Ok(goals) => {
                print_goals(&goals);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Goal update failed", &e)),
        }
    }
}

fn print_goals(goals: &GoalList) {
    if goals.is_empty() {
        println!("No goals yet");
        return;
    }
    println!("Your Goals");
    for (i, goal) in goals.goals.iter().enumerate() {
        println!("  {}. {}", i + 1, goal);
    }
}
