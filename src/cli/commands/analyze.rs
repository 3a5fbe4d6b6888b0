//! Analyze command implementation.

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tickerscope_backtest::{summary, summary_table, TickerAnalyzer};
use tickerscope_config::AppConfig;
use tickerscope_core::error::AnalysisResult;
use tickerscope_core::traits::{ResultSink, SeriesLoader};
use tickerscope_core::types::AnalysisReport;
use tickerscope_data::JsonResultSink;
use tracing::{error, info, warn};

use super::build_loader;
use crate::cli::{normalize_tickers, AnalyzeArgs};

/// What happened to one ticker.
#[derive(Debug)]
pub enum TickerOutcome {
    Written {
        report: Box<AnalysisReport>,
        path: PathBuf,
    },
    /// No usable data for the ticker
    Skipped(String),
    Failed(String),
}

impl TickerOutcome {
    fn is_written(&self) -> bool {
        matches!(self, TickerOutcome::Written { .. })
    }
}

pub async fn run(args: AnalyzeArgs, mut config: AppConfig) -> Result<()> {
    if !args.tickers.is_empty() {
        config.run.tickers = args.tickers;
    }
    if let Some(source) = &args.source {
        config.data.source = source.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(dir) = args.csv_dir {
        config.data.csv_dir = dir;
    }
    if let Some(out) = args.out {
        config.output.dir = out;
    }
    config.validate().context("Invalid configuration")?;

    let tickers = normalize_tickers(&config.run.tickers);
    info!(
        "Analyzing {} tickers from {:?} source",
        tickers.len(),
        config.data.source
    );

    let loader = build_loader(&config.data)?;
    let analyzer = Arc::new(
        TickerAnalyzer::new(config.analysis.to_settings())
            .context("Failed to create analyzer")?,
    );
    let sink: Arc<dyn ResultSink> = Arc::new(JsonResultSink::new(
        &config.output.dir,
        config.output.pretty,
    ));

    let outcomes = run_batch(
        tickers.clone(),
        loader,
        analyzer,
        sink,
        config.run.max_concurrency,
    )
    .await;

    let mut reports = Vec::new();
    for (ticker, outcome) in &outcomes {
        match outcome {
            TickerOutcome::Written { report, path } => {
                println!("{}", summary(report));
                info!(ticker = %ticker, path = %path.display(), "record written");
                reports.push(report.as_ref().clone());
            }
            TickerOutcome::Skipped(reason) => println!("{}: skipped ({})", ticker, reason),
            TickerOutcome::Failed(reason) => println!("{}: failed ({})", ticker, reason),
        }
    }
    if !reports.is_empty() {
        println!("{}", summary_table(&reports));
    }

    let written = outcomes.iter().filter(|(_, o)| o.is_written()).count();
    info!("Analysis complete: {}/{} tickers written", written, tickers.len());

    if written == 0 {
        anyhow::bail!("No ticker produced a result");
    }
    Ok(())
}

/// Analyze every ticker on its own task, at most `max_concurrency` at once.
///
/// Outcomes come back in input order regardless of completion order.
pub async fn run_batch(
    tickers: Vec<String>,
    loader: Arc<dyn SeriesLoader>,
    analyzer: Arc<TickerAnalyzer>,
    sink: Arc<dyn ResultSink>,
    max_concurrency: usize,
) -> Vec<(String, TickerOutcome)> {
    let mut outcomes: Vec<(usize, String, TickerOutcome)> = stream::iter(
        tickers.into_iter().enumerate(),
    )
    .map(|(index, ticker)| {
        let handle = tokio::spawn(analyze_ticker(
            ticker.clone(),
            Arc::clone(&loader),
            Arc::clone(&analyzer),
            Arc::clone(&sink),
        ));
        async move {
            let outcome = match handle.await {
                Ok(Ok((report, path))) => TickerOutcome::Written {
                    report: Box::new(report),
                    path,
                },
                Ok(Err(e)) if e.is_data_unavailable() => {
                    warn!(ticker = %ticker, error = %e, "no usable data, skipping");
                    TickerOutcome::Skipped(e.to_string())
                }
                Ok(Err(e)) => {
                    warn!(ticker = %ticker, error = %e, "analysis failed");
                    TickerOutcome::Failed(e.to_string())
                }
                Err(e) => {
                    error!(ticker = %ticker, error = %e, "analysis task aborted");
                    TickerOutcome::Failed(format!("task aborted: {}", e))
                }
            };
            (index, ticker, outcome)
        }
    })
    .buffer_unordered(max_concurrency.max(1))
    .collect()
    .await;

    outcomes.sort_by_key(|(index, _, _)| *index);
    outcomes
        .into_iter()
        .map(|(_, ticker, outcome)| (ticker, outcome))
        .collect()
}

async fn analyze_ticker(
    ticker: String,
    loader: Arc<dyn SeriesLoader>,
    analyzer: Arc<TickerAnalyzer>,
    sink: Arc<dyn ResultSink>,
) -> AnalysisResult<(AnalysisReport, PathBuf)> {
    let series = loader.load(&ticker).await?;
    let report = analyzer.analyze(&series)?;
    let path = sink.write(&report)?;
    Ok((report, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tickerscope_backtest::AnalysisSettings;
    use tickerscope_core::error::DataError;
    use tickerscope_core::types::{Bar, Series, Timeframe};

    struct StubLoader;

    #[async_trait]
    impl SeriesLoader for StubLoader {
        async fn load(&self, symbol: &str) -> Result<Series, DataError> {
            match symbol {
                "EMPTY" => Err(DataError::NoDataAvailable),
                "BOOM" => panic!("loader blew up"),
                _ => {
                    let bars = (0..40)
                        .map(|i| {
                            let price = 100.0 - i as f64;
                            Bar::new(i * 3_600_000, price, price, price, price, 1000.0)
                        })
                        .collect();
                    Series::new(symbol, Timeframe::Hour1, bars)
                }
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let sink: Arc<dyn ResultSink> = Arc::new(JsonResultSink::new(dir.path(), false));
        let analyzer = Arc::new(TickerAnalyzer::new(AnalysisSettings::default()).unwrap());

        let tickers = vec!["AAPL".to_string(), "EMPTY".to_string(), "BOOM".to_string()];
        let outcomes = run_batch(tickers, Arc::new(StubLoader), analyzer, sink, 2).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].0, "AAPL");
        assert!(outcomes[0].1.is_written());
        assert!(matches!(outcomes[1].1, TickerOutcome::Skipped(_)));
        assert!(matches!(outcomes[2].1, TickerOutcome::Failed(_)));
        assert!(dir.path().join("AAPL_data.json").exists());
        assert!(!dir.path().join("EMPTY_data.json").exists());
    }
}
