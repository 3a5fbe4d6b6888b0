//! Analysis report assembly and text summaries.

use tickerscope_core::types::{
    format_timestamp, AnalysisReport, DealRecord, HoldRecord, PerformanceSummary, Series, Signal,
};
use tickerscope_indicators::IndicatorFrame;

use crate::trades::TradeLog;

/// Assemble the serializable record for one ticker.
pub fn build_report(
    series: &Series,
    frame: &IndicatorFrame,
    signals: &[Signal],
    trades: &TradeLog,
    performance: PerformanceSummary,
) -> AnalysisReport {
    AnalysisReport {
        ticker: series.symbol().to_string(),
        timeframe: series.timeframe(),
        latest_close: series.last().map(|b| b.close).unwrap_or_default(),
        timestamps: series.iter().map(|b| format_timestamp(b.timestamp)).collect(),
        closes: series.closes(),
        indicators: frame.columns(),
        signals: signals.to_vec(),
        deals: trades.deals.iter().map(DealRecord::from).collect(),
        hold_periods: trades.hold_periods.iter().map(HoldRecord::from).collect(),
        performance,
    }
}

/// Generate a text summary for one ticker.
pub fn summary(report: &AnalysisReport) -> String {
    let perf = &report.performance;
    let mut s = String::new();

    s.push_str("═══════════════════════════════════════════════════════════\n");
    s.push_str(&format!("  {} ({} bars, {})\n", report.ticker, report.closes.len(), report.timeframe));
    s.push_str("═══════════════════════════════════════════════════════════\n");
    s.push_str(&format!("  Latest Close:        {:.2}\n", report.latest_close));
    s.push_str(&format!("  Starting Balance:    ${:.2}\n", perf.starting_balance));
    s.push_str(&format!("  Ending Balance:      ${:.2}\n", perf.ending_balance));
    s.push_str(&format!("  Profit:              ${:.2}\n", perf.profit));
    s.push_str(&format!("  Cumulative Return:   {:.2}%\n", perf.cumulative_return_pct));
    s.push_str(&format!("  Realized Trades:     {}\n", perf.total_trades));
    s.push_str(&format!("  Winning Trades:      {}\n", perf.winning_trades));
    s.push_str(&format!("  Win Rate:            {:.2}%\n", perf.win_rate * 100.0));
    if perf.unrealized_deals > 0 {
        s.push_str(&format!("  Open Position:       since {}\n", open_since(report)));
    }

    s
}

fn open_since(report: &AnalysisReport) -> &str {
    report.deals.last().map(|d| d.date.as_str()).unwrap_or("-")
}

/// One line per ticker, for the end of a run.
pub fn summary_table(reports: &[AnalysisReport]) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "{:<8} {:>6} {:>12} {:>7} {:>9} {:>12} {:>10}\n",
        "TICKER", "BARS", "LAST CLOSE", "TRADES", "WIN RATE", "PROFIT", "RETURN"
    ));
    s.push_str("───────────────────────────────────────────────────────────────────────\n");

    for report in reports {
        let perf = &report.performance;
        s.push_str(&format!(
            "{:<8} {:>6} {:>12.2} {:>7} {:>8.2}% {:>12.2} {:>9.2}%\n",
            report.ticker,
            report.closes.len(),
            report.latest_close,
            perf.total_trades,
            perf.win_rate * 100.0,
            perf.profit,
            perf.cumulative_return_pct,
        ));
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tickerscope_core::types::{Bar, Deal, Timeframe};

    fn report() -> AnalysisReport {
        let bars = vec![
            Bar::new(0, 10.0, 11.0, 9.0, 10.0, 100.0),
            Bar::new(3_600_000, 10.5, 11.0, 9.0, 10.25, 100.0),
        ];
        let series = Series::new("AAPL", Timeframe::Hour1, bars).unwrap();
        let frame = IndicatorFrame::compute(&series, &[2], 14).unwrap();
        let signals = vec![Signal::Flat, Signal::Enter];
        let trades = TradeLog {
            deals: vec![Deal::buy(3_600_000, 10.5)],
            hold_periods: vec![],
        };

        build_report(
            &series,
            &frame,
            &signals,
            &trades,
            PerformanceSummary::flat(dec!(10000), 1),
        )
    }

    #[test]
    fn test_build_report_aligns_columns() {
        let report = report();

        assert_eq!(report.ticker, "AAPL");
        assert_eq!(report.latest_close, 10.25);
        assert_eq!(report.timestamps, vec!["1970-01-01 00:00:00", "1970-01-01 01:00:00"]);
        assert_eq!(report.indicators["MA_2"], vec![None, Some(10.125)]);
        assert_eq!(report.indicators["RSI_14"], vec![None, None]);
        assert_eq!(report.deals[0].date, "1970-01-01 01:00:00");
    }

    #[test]
    fn test_summary_mentions_open_position() {
        let text = summary(&report());

        assert!(text.contains("AAPL"));
        assert!(text.contains("Win Rate:            0.00%"));
        assert!(text.contains("Open Position:       since 1970-01-01 01:00:00"));
    }

    #[test]
    fn test_summary_table_has_row_per_ticker() {
        let table = summary_table(&[report(), report()]);

        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().nth(2).unwrap().starts_with("AAPL"));
    }
}
