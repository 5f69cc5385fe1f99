// Stability command: checks stable ordering across buffer sizes

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;

use crate::services::stability::run_stability_checks;
use crate::utils::validation::validate_length;

/// Check that sorting stays stable for every buffer size
#[derive(Debug, Args)]
pub struct StabilityCommand {
    /// Number of elements to sort
    #[arg(short, long, value_name = "N", default_value_t = 9_000)]
    pub length: usize,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl StabilityCommand {
    /// Execute the stability command
    pub async fn run(&self) -> Result<()> {
        validate_length(self.length)?;

        let length = self.length;
        let report = tokio::task::spawn_blocking(move || run_stability_checks(length))
            .await
            .context("Stability checks did not complete")?;
        debug!(checks = report.checks.len(), "stability checks finished");

        if self.json {
            let json_output = serde_json::to_string_pretty(&report)
                .context("Failed to serialize JSON response")?;
            println!("{json_output}");
        } else if report.checks.is_empty() {
            println!(
                "Length {} is below the smallest buffer size; nothing to check",
                report.length
            );
        } else {
            println!("Stability: {} elements", report.length);
            for check in &report.checks {
                println!(
                    "  buffer {:>9} (n/{:<5}) {}",
                    check.buffer_size,
                    check.divisor,
                    if check.stable { "stable" } else { "UNSTABLE" }
                );
            }
        }

        if !report.all_stable() {
            bail!("Sorting was not stable for every buffer size");
        }

        Ok(())
    }
}
