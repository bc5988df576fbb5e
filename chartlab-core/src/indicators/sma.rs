//! Simple Moving Average (MA).
//!
//! Rolling arithmetic mean of close prices over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).
//! No exponential variant.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{closes, field, Bar};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MA period must be >= 1");
        Self {
            period,
            name: format!("ma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// The moving average of closes, NaN before warm-up.
    pub fn values(&self, bars: &[Bar]) -> Vec<f64> {
        sma_of_series(&closes(bars), self.period)
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let mut out = IndicatorValues::new();
        out.insert(field::ma(self.period), self.values(bars));
        out
    }
}

/// Simple moving average over an arbitrary series.
///
/// Index `i` is the mean of `values[i+1-period..=i]`; any NaN inside the
/// window makes that entry NaN. Each window is summed afresh, so a large
/// value leaves no residue once it drops out.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for (i, window) in values.windows(period).enumerate() {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i + period - 1] = window.iter().sum::<f64>() / period as f64;
    }

    result
}
