// Sort command: stable line sorting for files and stdin

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::services::fade_sort::FadeSorter;
use crate::utils::config::Config;
use crate::utils::error::FadeSortError;
use crate::utils::validation::{validate_buffer_size, validate_key_pattern};

/// Sort the lines of a file or stdin
#[derive(Debug, Args)]
pub struct SortCommand {
    /// Input file (stdin when omitted or '-')
    pub input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compare keys as floating point numbers
    #[arg(short, long)]
    pub numeric: bool,

    /// Reverse the order (equal lines keep their input order)
    #[arg(short, long)]
    pub reverse: bool,

    /// Sort by the first capture group of REGEX, or by the whole match
    #[arg(short, long, value_name = "REGEX")]
    pub key: Option<String>,

    /// Scratch buffer length in lines (default: [sort] buffer_size)
    #[arg(long, value_name = "N")]
    pub buffer_size: Option<usize>,

    /// Output JSON instead of plain lines
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for the sort command
#[derive(Debug, Serialize, Deserialize)]
pub struct SortResponse {
    pub status: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub line_count: usize,
    pub buffer_size: usize,
    /// Sorted lines, present when no output file was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

impl SortCommand {
    /// Execute the sort command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let buffer_size = self.buffer_size.unwrap_or(config.sort.buffer_size);
        validate_buffer_size(buffer_size)?;

        let key_pattern = self.key.as_deref().map(validate_key_pattern).transpose()?;

        let input_path = self.input_path();
        let content = read_input(input_path).await?;
        let lines: Vec<&str> = content.lines().collect();
        info!(lines = lines.len(), buffer_size, "sorting input");

        let sorter = FadeSorter::with_buffer_len(buffer_size);
        let order = self.sorted_order(&lines, key_pattern.as_ref(), &sorter)?;
        let sorted: Vec<&str> = order.into_iter().map(|i| lines[i]).collect();

        let mut rendered = String::with_capacity(content.len() + 1);
        for line in &sorted {
            rendered.push_str(line);
            rendered.push('\n');
        }

        if let Some(output) = &self.output {
            write_atomically(output, rendered.as_bytes()).await?;
            debug!(path = %output.display(), "wrote sorted output");
        }

        if self.json {
            let response = SortResponse {
                status: "success".to_string(),
                source: source_name(input_path),
                output: self.output.as_ref().map(|p| p.display().to_string()),
                line_count: sorted.len(),
                buffer_size,
                lines: self
                    .output
                    .is_none()
                    .then(|| sorted.iter().map(ToString::to_string).collect()),
            };

            let json_output = serde_json::to_string_pretty(&response)
                .context("Failed to serialize JSON response")?;
            println!("{json_output}");
        } else if let Some(output) = &self.output {
            println!("Sorted {} lines into {}", sorted.len(), output.display());
        } else {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await?;
            stdout.flush().await?;
        }

        Ok(())
    }

    fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// Compute the stable order of `lines` as indices into it
    fn sorted_order(
        &self,
        lines: &[&str],
        key_pattern: Option<&Regex>,
        sorter: &FadeSorter,
    ) -> Result<Vec<usize>> {
        let keys: Vec<&str> = lines
            .iter()
            .map(|line| extract_key(line, key_pattern))
            .collect();

        if self.numeric {
            let numbers = keys
                .iter()
                .enumerate()
                .map(|(i, key)| parse_number(key, self.input_path(), i + 1))
                .collect::<std::result::Result<Vec<f64>, _>>()?;
            Ok(order_by(numbers, sorter, self.reverse, f64::total_cmp))
        } else {
            Ok(order_by(keys, sorter, self.reverse, Ord::cmp))
        }
    }
}

/// The part of `line` that is compared. Lines the pattern does not match
/// get an empty key.
pub fn extract_key<'a>(line: &'a str, pattern: Option<&Regex>) -> &'a str {
    let Some(pattern) = pattern else {
        return line;
    };

    pattern.captures(line).map_or("", |caps| {
        caps.get(1)
            .or_else(|| caps.get(0))
            .map_or("", |m| m.as_str())
    })
}

fn parse_number(key: &str, source: Option<&Path>, line: usize) -> crate::utils::error::Result<f64> {
    key.trim()
        .parse::<f64>()
        .map_err(|_| FadeSortError::parse(source, line, format!("'{key}' is not a number")))
}

/// Sort `keys` stably and return the original positions in sorted order
fn order_by<K, F>(keys: Vec<K>, sorter: &FadeSorter, reverse: bool, mut compare: F) -> Vec<usize>
where
    K: Clone,
    F: FnMut(&K, &K) -> Ordering,
{
    let mut keyed: Vec<(K, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();

    sorter.sort_by(&mut keyed, |a, b| {
        let ord = compare(&a.0, &b.0);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });

    keyed.into_iter().map(|(_, i)| i).collect()
}

async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| input_error(e, Some(path)))
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .map_err(|e| input_error(e, None))
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Input that is not UTF-8 text is a user error, not an I/O failure
fn input_error(err: std::io::Error, path: Option<&Path>) -> FadeSortError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        FadeSortError::Validation(format!(
            "{} is not valid UTF-8 text; convert it first (for example with iconv)",
            source_name(path)
        ))
    } else {
        FadeSortError::from(err)
    }
}

/// Replace `target` with `contents` through a temporary file in the same
/// directory, so readers never see a partial file.
async fn write_atomically(target: &Path, contents: &[u8]) -> Result<()> {
    let dir = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let temp = tempfile::NamedTempFile::new_in(dir).map_err(FadeSortError::from)?;
    tokio::fs::write(temp.path(), contents)
        .await
        .map_err(FadeSortError::from)?;
    temp.persist(target)
        .map_err(|e| FadeSortError::from(e.error))
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(())
}

fn source_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}
