//! Ticker analysis CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use std::path::Path;
use tickerscope_config::{load_config, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; CLI flags win
    let file_config = load_config(&cli.config).ok();
    let logging_config = file_config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => logging_config.level.as_str(),
    };
    let json_logs = cli.json_logs || logging_config.format.eq_ignore_ascii_case("json");
    let _guard = setup_logging(log_level, json_logs, logging_config.file.as_deref());

    let config_path = cli.config;
    match cli.command {
        Commands::Analyze(args) => {
            cli::commands::analyze::run(args, resolve_config(&config_path, file_config)?).await
        }
        Commands::Fetch(args) => {
            cli::commands::fetch::run(args, resolve_config(&config_path, file_config)?).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(&config_path).await,
    }
}

/// Use the loaded file, falling back to built-in defaults only when the
/// default path is absent.
fn resolve_config(path: &Path, loaded: Option<AppConfig>) -> Result<AppConfig> {
    if let Some(config) = loaded {
        return Ok(config);
    }
    if path.exists() {
        // Surface the real parse error
        return Ok(load_config(path)?);
    }
    if path != Path::new(cli::DEFAULT_CONFIG) {
        anyhow::bail!("Config file '{}' does not exist", path.display());
    }
    tracing::warn!(path = %path.display(), "config file not found, using defaults");
    Ok(AppConfig::default())
}
