//! Results command implementation

use super::{report_failure, AppContext, Credentials};
use crate::core::results::{load_test_results, parameter_lines, ResultsView};
use crate::log_command_start;
use clap::Args;

/// Arguments for the results command
#[derive(Args, Debug)]
pub struct ResultsArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Print the records as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ResultsArgs {
    /// Execute the results command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match AppContext::open(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        log_command_start!("results", ctx.config.storage.backend);

        let user = match self.credentials.sign_in(&ctx).await {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };

        let view = match load_test_results(ctx.store.as_ref(), &user.uid).await {
            Ok(view) => view,
            Err(e) => return Ok(report_failure("Error fetching test results", &e)),
        };

        let (records, chart) = match view {
            ResultsView::Empty(message) => {
                println!("{message}");
                return Ok(0);
            }
            ResultsView::Loaded { records, chart } => (records, chart),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(0);
        }

        println!("Test Results");
        println!();
        for record in &records {
            println!("{} ({})", record.test_name, record.date.format("%Y-%m-%d"));
            for parameter in &record.parameters {
                for line in parameter_lines(record, parameter) {
                    println!("  {line}");
                }
            }
            println!();
        }

        if !chart.is_empty() {
            println!("Blood Test Trends");
            println!("  Dates: {}", chart.labels.join(", "));
            for dataset in &chart.datasets {
                let values: Vec<String> = dataset.data.iter().map(|v| v.to_string()).collect();
                println!("  {} ({}): {}", dataset.label, dataset.unit, values.join(", "));
            }
        }
        Ok(0)
    }
}
