//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use tickerscope_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Data source: {:?} ({})", config.data.source, config.data.interval);
    println!(
        "Windows: short {} / long {} / rsi {}",
        config.analysis.short_window, config.analysis.long_window, config.analysis.rsi_window
    );
    println!("Starting balance: {}", config.analysis.starting_balance);
    println!("Tickers: {}", config.run.tickers.join(", "));
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
