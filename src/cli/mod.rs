//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "tickerscope")]
#[command(author, version, about = "Intraday moving-average crossover analysis")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze tickers and write one JSON record per ticker
    Analyze(AnalyzeArgs),
    /// Download bar history to CSV files
    Fetch(FetchArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Tickers to analyze (comma-separated, overrides config)
    #[arg(short = 'T', long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Data source: yahoo or csv (overrides config)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Directory for CSV input when the source is csv
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Output directory for JSON records (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Tickers to download (comma-separated, overrides config)
    #[arg(short = 'T', long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Output directory for CSV files (defaults to data.csv_dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Upper-cased, de-duplicated ticker list, preserving order.
pub fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for ticker in tickers {
        let ticker = ticker.trim().to_uppercase();
        if !ticker.is_empty() && !seen.contains(&ticker) {
            seen.push(ticker);
        }
    }
    seen
}
