// fadesort - stable adaptive sorting in bounded extra space
// Main CLI entry point

use std::process;

use clap::Parser;
use fadesort::cli::{Cli, CliDispatcher};
use fadesort::utils::config::{Config, ConfigParser};
use fadesort::utils::error::UserError;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` means debug and the
/// configured `[logging] level` applies.
fn init_tracing(verbose: bool, level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let default_level = if verbose { "debug" } else { level };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let resolved = if cli.command.needs_config() {
        ConfigParser::resolve(cli.config.as_deref())
    } else {
        Ok((Config::default(), cli.config.clone()))
    };

    let (config, config_path) = match resolved {
        Ok(resolved) => resolved,
        Err(err) => {
            let user_error = UserError::from_fadesort_error(&err);
            user_error.print();
            process::exit(user_error.exit_code);
        }
    };

    init_tracing(cli.verbose, &config.logging.level);
    if let Some(path) = config_path.as_ref().filter(|_| cli.command.needs_config()) {
        tracing::debug!(path = %path.display(), "using configuration file");
    }

    let result = CliDispatcher::execute(cli.command, &config, config_path.as_deref()).await;

    if let Err(err) = result {
        let user_error = UserError::from_anyhow(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
