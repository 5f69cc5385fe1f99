// CLI module for command-line interface

pub mod bench;
pub mod config;
pub mod sort;
pub mod stability;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::utils::config::Config;

use self::bench::BenchCommand;
use self::config::ConfigCommands;
use self::sort::SortCommand;
use self::stability::StabilityCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "fadesort")]
#[command(about = "Stable adaptive sorting in bounded extra space")]
#[command(long_about = r#"fadesort sorts text stably with an adaptive merge sort that falls back
to a block-partition quicksort on unsorted stretches. Extra memory is
limited to a scratch buffer whose size you choose.

Features:
  • Stable line sorting with numeric, reverse and regex-key modes
  • Benchmarks against the standard library stable sort
  • Stability checks across shrinking buffer sizes
  • fadesort.toml configuration with per-user defaults

Examples:
  fadesort sort names.txt -o sorted.txt     Sort lines into a file
  fadesort sort --numeric --key 'ms=(\d+)'  Sort stdin by an embedded number
  fadesort bench --length 100000 --trials 3 Time against slice::sort
  fadesort stability                        Check stability for every buffer size
  fadesort config init                      Write a default fadesort.toml"#)]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file (default: ./fadesort.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sort the lines of a file or stdin
    #[command(long_about = r#"Sort lines stably. Lines that compare equal keep their input order.

Reads from INPUT, or stdin when INPUT is omitted or '-'. Writes to stdout
unless --output is given, in which case the file is replaced atomically.

Examples:
  fadesort sort data.txt                    Lexicographic sort to stdout
  fadesort sort data.txt -o data.txt        Sort a file in place
  fadesort sort --numeric --reverse         Largest number first
  fadesort sort --key '^\S+\s+(\S+)'        Sort by the second column
  fadesort sort --buffer-size 24 data.txt   Sort with a tiny scratch buffer"#)]
    Sort(SortCommand),

    /// Benchmark fadesort against the standard library sort
    #[command(long_about = r#"Benchmark fadesort against slice::sort on partially pre-sorted permutations.

Each trial shuffles 1..=N and then sorts random halving prefixes, so the
input has a mix of sorted runs and noise. Both sorts are timed on the same
input and their outputs are compared.

Examples:
  fadesort bench                            Use the [bench] settings
  fadesort bench --length 100000 --trials 3
  fadesort bench --seed 42 --json           Reproducible machine-readable report"#)]
    Bench(BenchCommand),

    /// Check that sorting stays stable for every buffer size
    #[command(long_about = r#"Sort a keyed input with buffers of N, N/2, N/4, ... down to 24 elements
and check each result against the expected stable order.

Examples:
  fadesort stability
  fadesort stability --length 100000 --json"#)]
    Stability(StabilityCommand),

    /// Show or create configuration
    #[command(long_about = r#"Manage fadesort.toml.

Subcommands:
  show    Print the configuration in effect and where it came from
  init    Write fadesort.toml with the default settings

Examples:
  fadesort config show
  fadesort config init --force"#)]
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Whether the command needs a loaded configuration.
    ///
    /// `config init` does not, so it can replace a broken file.
    pub const fn needs_config(&self) -> bool {
        !matches!(
            self,
            Self::Config {
                command: ConfigCommands::Init { .. }
            }
        )
    }
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command against the resolved configuration.
    ///
    /// `config_path` is where the configuration came from, or for
    /// `config init` the explicit `--config` target.
    pub async fn execute(command: Commands, config: &Config, config_path: Option<&Path>) -> Result<()> {
        match command {
            Commands::Sort(cmd) => cmd.run(config).await,
            Commands::Bench(cmd) => cmd.run(config).await,
            Commands::Stability(cmd) => cmd.run().await,
            Commands::Config { command } => command.run(config, config_path).await,
        }
    }
}
