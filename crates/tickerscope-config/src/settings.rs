//! Configuration structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tickerscope_backtest::AnalysisSettings;
use tickerscope_core::error::{AnalysisError, AnalysisResult};
use tickerscope_core::types::Timeframe;
use tickerscope_strategies::CrossoverConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl AppConfig {
    /// Check every section for values the pipeline cannot run with.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.analysis.to_settings().validate()?;
        self.run.validate()?;
        if self.data.timeout_secs == 0 {
            return Err(AnalysisError::Config(
                "data.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "tickerscope".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Optional log file; written in addition to stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Indicator and strategy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ma_windows: Vec<usize>,
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_window: usize,
    pub starting_balance: Decimal,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let defaults = AnalysisSettings::default();
        Self {
            ma_windows: defaults.ma_windows,
            short_window: defaults.crossover.short_window,
            long_window: defaults.crossover.long_window,
            rsi_window: defaults.rsi_window,
            starting_balance: defaults.starting_balance,
        }
    }
}

impl AnalysisConfig {
    /// Engine settings for this section.
    pub fn to_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            ma_windows: self.ma_windows.clone(),
            crossover: CrossoverConfig {
                short_window: self.short_window,
                long_window: self.long_window,
            },
            rsi_window: self.rsi_window,
            starting_balance: self.starting_balance,
        }
    }
}

/// Where price history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Yahoo Finance chart API
    #[default]
    Yahoo,
    /// Staged `{ticker}_data.csv` files
    Csv,
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yahoo" => Ok(DataSourceKind::Yahoo),
            "csv" => Ok(DataSourceKind::Csv),
            _ => Err(format!("Invalid data source: {} (expected yahoo or csv)", s)),
        }
    }
}

/// Data acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: DataSourceKind,
    /// Directory of staged CSV files
    pub csv_dir: PathBuf,
    pub base_url: String,
    /// Lookback range passed to the chart API
    pub range: String,
    pub interval: Timeframe,
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::Yahoo,
            csv_dir: PathBuf::from("data"),
            base_url: "https://query1.finance.yahoo.com".to_string(),
            range: "1mo".to_string(),
            interval: Timeframe::Minute30,
            timeout_secs: 30,
        }
    }
}

/// Result output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            pretty: true,
        }
    }
}

/// Ticker list and run concurrency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tickers: Vec<String>,
    pub max_concurrency: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tickers: ["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            max_concurrency: 4,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> AnalysisResult<()> {
        if self.tickers.iter().all(|t| t.trim().is_empty()) {
            return Err(AnalysisError::Config("at least one ticker required".into()));
        }
        if self.max_concurrency == 0 {
            return Err(AnalysisError::Config(
                "run.max_concurrency must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.ma_windows, vec![5, 30, 60]);
        assert_eq!(config.analysis.starting_balance, dec!(10000));
        assert_eq!(config.data.interval, Timeframe::Minute30);
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let mut config = AppConfig::default();
        config.analysis.short_window = 30;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.run.tickers = vec![];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.run.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!(DataSourceKind::from_str("CSV").unwrap(), DataSourceKind::Csv);
        assert_eq!(DataSourceKind::from_str("yahoo").unwrap(), DataSourceKind::Yahoo);
        assert!(DataSourceKind::from_str("bloomberg").is_err());
    }

    #[test]
    fn test_to_settings() {
        let settings = AnalysisConfig::default().to_settings();
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_toml_render_round_trips() {
        let rendered = AppConfig::default().to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.run.tickers, AppConfig::default().run.tickers);
        assert_eq!(parsed.data.source, DataSourceKind::Yahoo);
    }
}
