//! Moving average indicators.

use tickerscope_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. Every window is
/// summed from scratch rather than with a running sum, so no drift builds up
/// along the series. Averages over different window lengths can still differ
/// by a few ulps on a flat price; callers comparing them need a tolerance.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            name: format!("MA_{}", period),
        }
    }
}

/// Arithmetic mean of every full window of `data`.
pub(crate) fn rolling_mean(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let period_f64 = period as f64;
    data.windows(period)
        .map(|window| window.iter().sum::<f64>() / period_f64)
        .collect()
}

impl Indicator for Sma {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        rolling_mean(data, self.period)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];

        assert!(sma.calculate(&data).is_empty());
        assert_eq!(sma.calculate_aligned(&data), vec![None, None, None]);
    }

    #[test]
    fn test_sma_aligned() {
        let sma = Sma::new(2);
        let aligned = sma.calculate_aligned(&[1.0, 3.0, 5.0]);

        assert_eq!(aligned, vec![None, Some(2.0), Some(4.0)]);
        assert_eq!(sma.name(), "MA_2");
    }

    #[test]
    fn test_equal_prices_give_near_equal_averages() {
        for price in [10.0, 0.1, 1.1, 187.43] {
            let data = vec![price; 40];
            let short = Sma::new(5).calculate(&data);
            let long = Sma::new(30).calculate(&data);

            let (s, l) = (short[short.len() - 1], long[long.len() - 1]);
            assert!((s - l).abs() <= 1e-12 * price, "price {}: {} vs {}", price, s, l);
        }
    }

    #[test]
    #[should_panic(expected = "Period must be greater than 0")]
    fn test_zero_period_panics() {
        Sma::new(0);
    }
}
