//! Configuration management.

mod settings;

pub use settings::{
    AnalysisConfig, AppConfig, AppSettings, DataConfig, DataSourceKind, LoggingConfig,
    OutputConfig, RunConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `TICKERSCOPE__SECTION__KEY` form, e.g.
/// `TICKERSCOPE__RUN__TICKERS=AAPL,MSFT`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("TICKERSCOPE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("run.tickers")
                .with_list_parse_key("analysis.ma_windows")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
