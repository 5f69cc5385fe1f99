// Common validation utilities for fadesort CLI commands

use regex::Regex;

use crate::utils::error::{FadeSortError, Result};

/// Largest input the benchmarks will generate
pub const MAX_BENCH_LENGTH: usize = 100_000_000;

/// Validate a scratch buffer length given on the command line
pub fn validate_buffer_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(FadeSortError::Validation(
            "Buffer size must be at least 1.\n\nExample:\n  fadesort sort data.txt --buffer-size 256".to_string(),
        ));
    }
    Ok(())
}

/// Validate a generated input length
pub fn validate_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_BENCH_LENGTH {
        return Err(FadeSortError::Validation(format!(
            "Length must be between 1 and {MAX_BENCH_LENGTH}, got {length}."
        )));
    }
    Ok(())
}

/// Validate a trial count
pub fn validate_trials(trials: usize) -> Result<()> {
    if trials == 0 {
        return Err(FadeSortError::Validation(
            "At least one trial is required.\n\nExample:\n  fadesort bench --trials 5".to_string(),
        ));
    }
    Ok(())
}

/// Compile a sort key pattern, allowing at most one capture group
pub fn validate_key_pattern(pattern: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(FadeSortError::Validation(
            "Key pattern cannot be empty.\n\nExamples:\n  --key '^\\S+'\n  --key 'id=(\\d+)'".to_string(),
        ));
    }

    let regex = Regex::new(pattern)
        .map_err(|e| FadeSortError::Validation(format!("Invalid key pattern '{pattern}': {e}")))?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() > 2 {
        return Err(FadeSortError::Validation(format!(
            "Key pattern '{pattern}' has {} capture groups; use at most one (or (?:...) for grouping).",
            regex.captures_len() - 1
        )));
    }

    Ok(regex)
}
