//! Indicator trait definitions.

/// Trait for technical indicators.
///
/// Indicators process price data and produce derived values
/// useful for trading decisions.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// Returns one value per position that has enough history, so the
    /// first value corresponds to `data[self.period() - 1]`. Returns an empty
    /// vector when there is not enough data.
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate values aligned index-for-index with `data`.
    ///
    /// Positions without enough history are `None`, never zero.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<Option<f64>> {
        let values = self.calculate(data);
        let warmup = data.len() - values.len();

        std::iter::repeat(None)
            .take(warmup)
            .chain(values.into_iter().map(Some))
            .collect()
    }
}
