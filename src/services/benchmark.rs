// Benchmark trials comparing fadesort with the standard library stable sort

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::models::report::{BenchReport, BenchTrial};
use crate::services::data_generator::InputGenerator;
use crate::services::fade_sort::{profile_runs, FadeSorter};
use crate::utils::config::BenchSettings;

/// Runs benchmark trials off the async runtime
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    settings: BenchSettings,
    buffer_size: usize,
    seed: u64,
}

impl BenchmarkRunner {
    /// Create a runner; a random seed is drawn when the settings carry none
    pub fn new(settings: BenchSettings, buffer_size: usize) -> Self {
        let seed = settings.seed.unwrap_or_else(|| fastrand::u64(..));
        Self {
            settings,
            buffer_size,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run every trial in sequence. Each trial gets its own input derived
    /// from the session seed.
    pub async fn run(&self) -> Result<BenchReport> {
        let mut trials = Vec::with_capacity(self.settings.trials);

        for trial in 1..=self.settings.trials {
            let length = self.settings.length;
            let floor = self.settings.presorted_floor;
            let buffer_size = self.buffer_size;
            let seed = self.seed.wrapping_add(trial as u64);

            let result = tokio::task::spawn_blocking(move || {
                let input = InputGenerator::new(seed).presorted_permutation(length, floor);
                run_trial(trial, input, buffer_size)
            })
            .await
            .with_context(|| format!("Benchmark trial {trial} did not complete"))?;

            info!(
                trial,
                fadesort_ms = result.fadesort_ms,
                std_ms = result.std_ms,
                verified = result.verified,
                "trial finished"
            );
            trials.push(result);
        }

        Ok(BenchReport {
            generated_at: Utc::now(),
            length: self.settings.length,
            buffer_size: self.buffer_size,
            seed: self.seed,
            trials,
        })
    }
}

/// Time both sorts on copies of `input` and check they agree
pub fn run_trial(trial: usize, input: Vec<u32>, buffer_size: usize) -> BenchTrial {
    let profile = profile_runs(&input, u32::cmp);

    let mut ours = input.clone();
    let mut theirs = input;

    let started = Instant::now();
    FadeSorter::with_buffer_len(buffer_size).sort(&mut ours);
    let fadesort_ms = started.elapsed().as_secs_f64() * 1_000.0;

    let started = Instant::now();
    theirs.sort();
    let std_ms = started.elapsed().as_secs_f64() * 1_000.0;

    BenchTrial {
        trial,
        fadesort_ms,
        std_ms,
        verified: ours == theirs,
        profile,
    }
}
