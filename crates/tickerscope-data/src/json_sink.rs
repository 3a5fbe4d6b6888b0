//! JSON result sink.

use std::path::PathBuf;
use tickerscope_core::error::DataError;
use tickerscope_core::traits::ResultSink;
use tickerscope_core::types::AnalysisReport;
use tracing::info;

/// Writes each report to `{dir}/{ticker}_data.json`.
#[derive(Debug, Clone)]
pub struct JsonResultSink {
    dir: PathBuf,
    pretty: bool,
}

impl JsonResultSink {
    pub fn new(dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            dir: dir.into(),
            pretty,
        }
    }

    /// Output path for a ticker.
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}_data.json", ticker))
    }
}

impl ResultSink for JsonResultSink {
    fn write(&self, report: &AnalysisReport) -> Result<PathBuf, DataError> {
        std::fs::create_dir_all(&self.dir)?;

        let json = report
            .to_json(self.pretty)
            .map_err(|e| DataError::Serialization(e.to_string()))?;
        let path = self.path_for(&report.ticker);
        std::fs::write(&path, json)?;

        info!(ticker = %report.ticker, path = %path.display(), "Results saved");
        Ok(path)
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use tempfile::TempDir;
    use tickerscope_core::types::{PerformanceSummary, Signal, Timeframe};

    fn report(ticker: &str) -> AnalysisReport {
        let mut indicators = BTreeMap::new();
        indicators.insert("MA_5".to_string(), vec![None]);
        indicators.insert("RSI_14".to_string(), vec![None]);

        AnalysisReport {
            ticker: ticker.to_string(),
            timeframe: Timeframe::Hour1,
            latest_close: 186.5,
            timestamps: vec!["2024-01-15 14:30:00".to_string()],
            closes: vec![186.5],
            indicators,
            signals: vec![Signal::Flat],
            deals: vec![],
            hold_periods: vec![],
            performance: PerformanceSummary::flat(dec!(10000), 0),
        }
    }

    #[test]
    fn test_writes_keyed_by_ticker() {
        let dir = TempDir::new().unwrap();
        let sink = JsonResultSink::new(dir.path().join("out"), false);

        let path = sink.write(&report("AAPL")).unwrap();
        assert_eq!(path, dir.path().join("out").join("AAPL_data.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["latest_close"], 186.5);
        assert!(value["MA_5"][0].is_null());
        assert_eq!(value["prices"][0], 186.5);
        assert_eq!(value["total_trades"], 0);
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let sink = JsonResultSink::new(dir.path(), true);

        let path = sink.write(&report("MSFT")).unwrap();
        let first = std::fs::read(&path).unwrap();
        sink.write(&report("MSFT")).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }
}
