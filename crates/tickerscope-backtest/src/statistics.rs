//! Performance of realized crossover trades.

use rust_decimal::prelude::*;
use tickerscope_core::types::{Action, Deal, PerformanceSummary};
use tracing::{debug, warn};

/// Convert an execution price to a decimal, if it fits.
fn to_decimal(price: f64) -> Option<Decimal> {
    Decimal::try_from(price).ok()
}

/// Balance after buying whole shares at `buy` and selling them all at `sell`.
///
/// `None` when either price or the resulting amounts fall outside the decimal
/// range; such a pair executes nothing.
fn replay_pair(balance: Decimal, buy: Decimal, sell: Decimal) -> Option<Decimal> {
    if buy <= Decimal::ZERO {
        return Some(balance);
    }
    let shares = balance.checked_div(buy)?.floor();
    let cost = shares.checked_mul(buy)?;
    let proceeds = shares.checked_mul(sell)?;
    balance.checked_sub(cost)?.checked_add(proceeds)
}

/// Replay matched buy/sell pairs against a starting cash balance.
///
/// An odd-length deal list has its final (unmatched) deal dropped before
/// pairing. Each pair buys as many whole shares as the balance allows at the
/// buy price, keeps the remainder as cash, and sells them all at the sell
/// price. A pair wins when it sells at or above its buy price.
///
/// A pair whose prices cannot be represented as decimals, or whose share
/// count overflows, leaves the balance untouched and is not a win.
///
/// Profit and cumulative return are rounded to two places with banker's
/// rounding; the win rate is 0 when no pair was closed.
pub fn evaluate_performance(deals: &[Deal], starting_balance: Decimal) -> PerformanceSummary {
    let realized_len = deals.len() - deals.len() % 2;
    let (realized, unrealized) = deals.split_at(realized_len);

    if realized.is_empty() {
        return PerformanceSummary::flat(starting_balance, unrealized.len());
    }

    let mut balance = starting_balance;
    let mut pairs = 0usize;
    let mut winning = 0usize;

    for pair in realized.chunks_exact(2) {
        let (buy, sell) = (&pair[0], &pair[1]);
        debug_assert_eq!(buy.action, Action::Buy);
        debug_assert_eq!(sell.action, Action::Sell);
        pairs += 1;

        let prices = to_decimal(buy.price).zip(to_decimal(sell.price));
        let replayed = prices.and_then(|(b, s)| replay_pair(balance, b, s).map(|next| (b, s, next)));

        match replayed {
            Some((buy_price, sell_price, next)) => {
                balance = next;
                if sell_price >= buy_price {
                    winning += 1;
                }
            }
            None => {
                warn!(
                    buy = buy.price,
                    sell = sell.price,
                    "Pair outside decimal range; nothing executed"
                );
            }
        }
    }

    let profit = (balance - starting_balance).round_dp(2);
    let cumulative_return_pct = if starting_balance > Decimal::ZERO {
        (profit * Decimal::ONE_HUNDRED / starting_balance).round_dp(2)
    } else {
        Decimal::ZERO.round_dp(2)
    };
    let win_rate = winning as f64 / pairs as f64;

    debug!(
        pairs,
        winning,
        %profit,
        %cumulative_return_pct,
        unrealized = unrealized.len(),
        "Evaluated performance"
    );

    PerformanceSummary {
        total_trades: pairs,
        winning_trades: winning,
        win_rate,
        profit,
        cumulative_return_pct,
        starting_balance,
        ending_balance: balance,
        unrealized_deals: unrealized.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_deals() {
        let summary = evaluate_performance(&[], dec!(10000));

        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.profit, dec!(0.00));
        assert_eq!(summary.cumulative_return_pct, dec!(0.00));
        assert_eq!(summary.ending_balance, dec!(10000));
    }

    #[test]
    fn test_single_pair_whole_shares() {
        // floor(10000 / 33) = 303 shares, 1.00 left over
        let deals = [Deal::buy(1, 33.0), Deal::sell(2, 35.5)];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.ending_balance, dec!(10757.5));
        assert_eq!(summary.profit, dec!(757.50));
        // 7.575 rounds half to even
        assert_eq!(summary.cumulative_return_pct, dec!(7.58));
        assert_eq!(summary.win_rate, 1.0);
    }

    #[test]
    fn test_balance_compounds_across_pairs() {
        let deals = [
            Deal::buy(1, 100.0),
            Deal::sell(2, 110.0),
            Deal::buy(3, 110.0),
            Deal::sell(4, 99.0),
        ];
        let summary = evaluate_performance(&deals, dec!(10000));

        // 100 shares -> 11000; 100 shares -> 9900
        assert_eq!(summary.ending_balance, dec!(9900));
        assert_eq!(summary.profit, dec!(-100.00));
        assert_eq!(summary.cumulative_return_pct, dec!(-1.00));
        assert_eq!(summary.total_trades, 2);
        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.win_rate, 0.5);
    }

    #[test]
    fn test_break_even_counts_as_win() {
        let deals = [Deal::buy(1, 50.0), Deal::sell(2, 50.0)];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.profit, dec!(0.00));
    }

    #[test]
    fn test_trailing_buy_excluded() {
        let deals = [
            Deal::buy(1, 10.0),
            Deal::sell(2, 5.0),
            Deal::buy(3, 1.0),
        ];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.unrealized_deals, 1);
        assert_eq!(summary.ending_balance, dec!(5000));
        assert_eq!(summary.profit, dec!(-5000.00));
        assert_eq!(summary.cumulative_return_pct, dec!(-50.00));
        assert_eq!(summary.win_rate, 0.0);
    }

    #[test]
    fn test_lone_buy_is_never_paired() {
        let summary = evaluate_performance(&[Deal::buy(1, 10.0)], dec!(10000));

        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.unrealized_deals, 1);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.ending_balance, dec!(10000));
    }

    #[test]
    fn test_price_above_balance_buys_nothing() {
        let deals = [Deal::buy(1, 20000.0), Deal::sell(2, 30000.0)];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.ending_balance, dec!(10000));
        assert_eq!(summary.profit, dec!(0.00));
        assert_eq!(summary.winning_trades, 1);
    }

    #[test]
    fn test_tiny_buy_price_does_not_overflow() {
        // 10000 / 1e-26 exceeds the decimal range
        let deals = [Deal::buy(1, 1e-26), Deal::sell(2, 1.0)];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.winning_trades, 0);
        assert_eq!(summary.ending_balance, dec!(10000));
        assert_eq!(summary.profit, dec!(0.00));
    }

    #[test]
    fn test_unrepresentable_sell_price_executes_nothing() {
        let deals = [
            Deal::buy(1, 1.0),
            Deal::sell(2, 1e30),
            Deal::buy(3, 100.0),
            Deal::sell(4, 110.0),
        ];
        let summary = evaluate_performance(&deals, dec!(10000));

        assert_eq!(summary.total_trades, 2);
        assert_eq!(summary.winning_trades, 1);
        assert_eq!(summary.win_rate, 0.5);
        // Only the second pair moves the balance: 100 shares, +10 each
        assert_eq!(summary.ending_balance, dec!(11000));
        assert_eq!(summary.profit, dec!(1000.00));
    }

    #[test]
    fn test_win_rate_bounds() {
        let deals: Vec<Deal> = (0..10)
            .flat_map(|i| {
                let buy = 100.0 + i as f64;
                let sell = if i % 3 == 0 { buy - 1.0 } else { buy + 1.0 };
                [Deal::buy(i * 2, buy), Deal::sell(i * 2 + 1, sell)]
            })
            .collect();
        let summary = evaluate_performance(&deals, dec!(10000));

        assert!((0.0..=1.0).contains(&summary.win_rate));
        assert_eq!(summary.total_trades, 10);
        assert_eq!(summary.winning_trades, 6);
    }
}
