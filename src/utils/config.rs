// Configuration utilities and TOML parsing

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::error::{FadeSortError, Result};

/// Log levels accepted in `[logging] level`
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Full contents of `fadesort.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sort: SortSettings,
    pub bench: BenchSettings,
    pub logging: LoggingSettings,
}

/// `[sort]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    /// Preferred scratch buffer length in elements
    pub buffer_size: usize,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self { buffer_size: 256 }
    }
}

/// `[bench]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    /// Number of elements per trial
    pub length: usize,
    /// Number of trials
    pub trials: usize,
    /// Pre-sorted halves are only made while they are longer than this
    pub presorted_floor: usize,
    /// Fixed seed for reproducible inputs; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            length: 1_000_000,
            trials: 10,
            presorted_floor: 50_000,
            seed: None,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load and validate a configuration file
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FadeSortError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| FadeSortError::config(path, e))?;

        Self::parse_config(&content).map_err(|e| match e {
            FadeSortError::Config(msg) => FadeSortError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse configuration from a TOML string and validate it
    pub fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| FadeSortError::Config(format!("Invalid TOML syntax: {e}")))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
        let path = path.as_ref();

        Self::validate(config)?;

        let content = toml::to_string_pretty(config)
            .map_err(|e| FadeSortError::Config(format!("Failed to serialize configuration: {e}")))?;

        fs::write(path, content).map_err(|e| FadeSortError::config(path, e))?;
        Ok(())
    }

    /// Find and load the configuration in effect.
    ///
    /// An explicit path must exist. Otherwise `./fadesort.toml`, then the
    /// user configuration directory, then the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_config(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(get_local_config_path()).chain(get_user_config_path());
        for candidate in candidates {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading configuration");
                return Ok((Self::load_config(&candidate)?, Some(candidate)));
            }
        }

        Ok((Config::default(), None))
    }

    /// Reject settings the sorter or benchmarks cannot run with
    pub fn validate(config: &Config) -> Result<()> {
        if config.sort.buffer_size == 0 {
            return Err(FadeSortError::Validation(
                "[sort] buffer_size must be at least 1".to_string(),
            ));
        }

        if config.bench.length == 0 {
            return Err(FadeSortError::Validation(
                "[bench] length must be at least 1".to_string(),
            ));
        }

        if config.bench.trials == 0 {
            return Err(FadeSortError::Validation(
                "[bench] trials must be at least 1".to_string(),
            ));
        }

        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(FadeSortError::Validation(format!(
                "Unknown log level '{}'. Expected one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

pub fn get_local_config_path() -> PathBuf {
    PathBuf::from("fadesort.toml")
}

pub fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fadesort").join("config.toml"))
}
