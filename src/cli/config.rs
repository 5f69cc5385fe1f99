// Config command: inspect and create fadesort.toml

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::utils::config::{get_local_config_path, Config, ConfigParser};
use crate::utils::error::FadeSortError;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration in effect
    Show {
        /// Output JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Write fadesort.toml (or the --config path) with the default settings
    Init {
        /// Overwrite an existing fadesort.toml
        #[arg(long)]
        force: bool,
    },
}

/// JSON response format for `config show`
#[derive(Debug, Serialize)]
struct ShowResponse<'a> {
    source: String,
    config: &'a Config,
}

impl ConfigCommands {
    /// Execute a config subcommand
    pub async fn run(&self, config: &Config, config_path: Option<&Path>) -> Result<()> {
        match self {
            Self::Show { json } => show(config, config_path, *json),
            Self::Init { force } => {
                let path = config_path.map_or_else(get_local_config_path, Path::to_path_buf);
                init_config(&path, *force)?;
                println!("Created {}", path.display());
                Ok(())
            }
        }
    }
}

fn show(config: &Config, config_path: Option<&Path>, json: bool) -> Result<()> {
    let source = config_path.map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());

    if json {
        let response = ShowResponse { source, config };
        let json_output = serde_json::to_string_pretty(&response)
            .context("Failed to serialize JSON response")?;
        println!("{json_output}");
    } else {
        let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
        println!("# source: {source}");
        print!("{content}");
    }

    Ok(())
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> crate::utils::error::Result<()> {
    if path.exists() && !force {
        return Err(FadeSortError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigParser::save_config(&Config::default(), path)
}
