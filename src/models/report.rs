use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::span::{RunKind, TypedRun};

/// How an input splits into runs before sorting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProfile {
    /// Number of elements examined
    pub len: usize,
    /// Minimum length for a sorted stretch to count as a run
    pub min_run_len: usize,
    /// Runs already in order
    pub non_descending: usize,
    /// Runs in strictly descending order
    pub descending: usize,
    /// Gaps with no usable order
    pub unsorted: usize,
    /// Elements covered by ordered runs of either direction
    pub presorted_elements: usize,
}

impl RunProfile {
    pub fn from_runs(len: usize, min_run_len: usize, runs: &[TypedRun]) -> Self {
        let mut profile = Self {
            len,
            min_run_len,
            non_descending: 0,
            descending: 0,
            unsorted: 0,
            presorted_elements: 0,
        };

        for run in runs {
            match run.kind {
                RunKind::NonDescending => profile.non_descending += 1,
                RunKind::Descending => profile.descending += 1,
                RunKind::Unsorted => continue,
            }
            profile.presorted_elements += run.len();
        }
        profile.unsorted = runs.len() - profile.non_descending - profile.descending;

        profile
    }

    pub fn total_runs(&self) -> usize {
        self.non_descending + self.descending + self.unsorted
    }

    /// Fraction of elements already inside ordered runs
    pub fn presortedness(&self) -> f64 {
        if self.len == 0 {
            return 1.0;
        }
        self.presorted_elements as f64 / self.len as f64
    }
}

/// Timing of one benchmark trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchTrial {
    pub trial: usize,
    /// Wall time for fadesort in milliseconds
    pub fadesort_ms: f64,
    /// Wall time for the standard library stable sort in milliseconds
    pub std_ms: f64,
    /// Whether fadesort's output matched the standard library's
    pub verified: bool,
    pub profile: RunProfile,
}

/// Results of a benchmark session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub length: usize,
    pub buffer_size: usize,
    pub seed: u64,
    pub trials: Vec<BenchTrial>,
}

impl BenchReport {
    pub fn mean_fadesort_ms(&self) -> f64 {
        mean(self.trials.iter().map(|t| t.fadesort_ms))
    }

    pub fn mean_std_ms(&self) -> f64 {
        mean(self.trials.iter().map(|t| t.std_ms))
    }

    pub fn all_verified(&self) -> bool {
        self.trials.iter().all(|t| t.verified)
    }
}

/// Result of sorting the stability input with one buffer size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityCheck {
    /// Buffer size is the input length divided by this
    pub divisor: usize,
    pub buffer_size: usize,
    pub stable: bool,
}

/// Results of a stability session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub generated_at: DateTime<Utc>,
    pub length: usize,
    pub checks: Vec<StabilityCheck>,
}

impl StabilityReport {
    pub fn all_stable(&self) -> bool {
        self.checks.iter().all(|c| c.stable)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
