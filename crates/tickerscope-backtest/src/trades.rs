//! Deal extraction from crossover signals.

use tickerscope_core::types::{Deal, HoldPeriod, Series, Signal};

/// Deals and completed holding periods for one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    /// Buy, Sell, Buy, Sell, ... possibly ending on an unmatched Buy
    pub deals: Vec<Deal>,
    pub hold_periods: Vec<HoldPeriod>,
}

impl TradeLog {
    /// Whether the log ends on a buy with no matching sell.
    pub fn has_open_position(&self) -> bool {
        self.deals.len() % 2 == 1
    }
}

/// Walk the signals in order and record the simulated executions.
///
/// `Enter` buys at the bar's open, `Exit` sells at the bar's close and closes
/// the holding period opened by the last entry. Other signals do nothing.
/// `signals` is expected to be aligned with `series`; extra entries on
/// either side are ignored.
pub fn extract_trades(series: &Series, signals: &[Signal]) -> TradeLog {
    let mut log = TradeLog::default();
    let mut entry: Option<i64> = None;

    for (bar, signal) in series.iter().zip(signals) {
        match signal {
            Signal::Enter => {
                log.deals.push(Deal::buy(bar.timestamp, bar.open));
                entry = Some(bar.timestamp);
            }
            Signal::Exit => {
                log.deals.push(Deal::sell(bar.timestamp, bar.close));
                if let Some(entered) = entry.take() {
                    log.hold_periods.push(HoldPeriod {
                        entry: entered,
                        exit: bar.timestamp,
                    });
                }
            }
            Signal::HoldLong | Signal::Flat => {}
        }
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerscope_core::types::{Action, Bar, Timeframe};

    fn series(n: usize) -> Series {
        let bars = (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Bar::new(i as i64, base, base + 2.0, base - 2.0, base + 0.5, 1000.0)
            })
            .collect();
        Series::new("TEST", Timeframe::Hour1, bars).unwrap()
    }

    #[test]
    fn test_buy_at_open_sell_at_close() {
        let signals = [Signal::Flat, Signal::Enter, Signal::HoldLong, Signal::Exit];
        let log = extract_trades(&series(4), &signals);

        assert_eq!(log.deals, vec![Deal::buy(1, 101.0), Deal::sell(3, 103.5)]);
        assert_eq!(log.hold_periods, vec![HoldPeriod { entry: 1, exit: 3 }]);
        assert!(!log.has_open_position());
    }

    #[test]
    fn test_trailing_buy_is_kept() {
        let signals = [
            Signal::Enter,
            Signal::Exit,
            Signal::Flat,
            Signal::Enter,
            Signal::HoldLong,
        ];
        let log = extract_trades(&series(5), &signals);

        let actions: Vec<Action> = log.deals.iter().map(|d| d.action).collect();
        assert_eq!(actions, vec![Action::Buy, Action::Sell, Action::Buy]);
        assert_eq!(log.hold_periods.len(), 1);
        assert!(log.has_open_position());
    }

    #[test]
    fn test_no_transitions_no_deals() {
        let log = extract_trades(&series(3), &[Signal::Flat; 3]);

        assert!(log.deals.is_empty());
        assert!(log.hold_periods.is_empty());
    }

    #[test]
    fn test_deals_alternate_starting_with_buy() {
        let signals = [
            Signal::Flat,
            Signal::Enter,
            Signal::Exit,
            Signal::Enter,
            Signal::HoldLong,
            Signal::Exit,
            Signal::Flat,
            Signal::Enter,
        ];
        let log = extract_trades(&series(signals.len()), &signals);

        for (i, deal) in log.deals.iter().enumerate() {
            let expected = if i % 2 == 0 { Action::Buy } else { Action::Sell };
            assert_eq!(deal.action, expected);
        }
        let buys = log.deals.iter().filter(|d| d.action == Action::Buy).count();
        let sells = log.deals.len() - buys;
        assert!(sells <= buys && buys <= sells + 1);
        assert!(log.deals.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }
}
