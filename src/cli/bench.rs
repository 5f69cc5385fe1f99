// Bench command: timing fadesort against the standard library sort

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::models::report::BenchReport;
use crate::services::benchmark::BenchmarkRunner;
use crate::utils::config::{BenchSettings, Config};
use crate::utils::validation::{validate_buffer_size, validate_length, validate_trials};

/// Benchmark fadesort against the standard library sort
#[derive(Debug, Args)]
pub struct BenchCommand {
    /// Elements per trial (default: [bench] length)
    #[arg(short, long, value_name = "N")]
    pub length: Option<usize>,

    /// Number of trials (default: [bench] trials)
    #[arg(short, long, value_name = "N")]
    pub trials: Option<usize>,

    /// Scratch buffer length (default: [sort] buffer_size)
    #[arg(long, value_name = "N")]
    pub buffer_size: Option<usize>,

    /// Seed for reproducible inputs (default: [bench] seed, else random)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl BenchCommand {
    /// Execute the bench command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let settings = self.settings(&config.bench);
        let buffer_size = self.buffer_size.unwrap_or(config.sort.buffer_size);

        validate_length(settings.length)?;
        validate_trials(settings.trials)?;
        validate_buffer_size(buffer_size)?;

        let report = BenchmarkRunner::new(settings, buffer_size).run().await?;

        if self.json {
            let json_output = serde_json::to_string_pretty(&report)
                .context("Failed to serialize JSON response")?;
            println!("{json_output}");
        } else {
            print_report(&report);
        }

        if !report.all_verified() {
            bail!("fadesort output differed from slice::sort (seed {})", report.seed);
        }

        Ok(())
    }

    /// Command line values layered over the configured settings
    fn settings(&self, base: &BenchSettings) -> BenchSettings {
        BenchSettings {
            length: self.length.unwrap_or(base.length),
            trials: self.trials.unwrap_or(base.trials),
            presorted_floor: base.presorted_floor,
            seed: self.seed.or(base.seed),
        }
    }
}

fn print_report(report: &BenchReport) {
    println!(
        "Benchmark: {} elements, buffer {}, seed {}",
        report.length, report.buffer_size, report.seed
    );
    println!();
    println!(
        "{:>5}  {:>12}  {:>12}  {:>6}  {:>9}  {:>9}",
        "trial", "fadesort ms", "std ms", "runs", "presorted", "verified"
    );

    for trial in &report.trials {
        println!(
            "{:>5}  {:>12.3}  {:>12.3}  {:>6}  {:>8.1}%  {:>9}",
            trial.trial,
            trial.fadesort_ms,
            trial.std_ms,
            trial.profile.total_runs(),
            trial.profile.presortedness() * 100.0,
            if trial.verified { "yes" } else { "NO" }
        );
    }

    println!();
    println!(
        "Mean: fadesort {:.3} ms, std {:.3} ms",
        report.mean_fadesort_ms(),
        report.mean_std_ms()
    );
}
