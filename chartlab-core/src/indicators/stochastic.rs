//! Stochastic Oscillator — close position inside the rolling high/low range.
//!
//! raw %K = 100 * (close - lowest_low) / (highest_high - lowest_low)
//! %K = MA(raw %K, smooth_k), %D = MA(%K, smooth_d).
//! First %K at period + smooth_k - 2, first %D at period + smooth_k + smooth_d - 3.
//! A zero high/low range divides by 1 instead, which gives raw %K = 0 for a
//! flat window.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{field, Bar};
use crate::indicators::{guarded_div, sma_of_series};

/// Smoothed %K and %D series.
#[derive(Debug, Clone)]
pub struct StochasticOutput {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smooth_k: usize,
    smooth_d: usize,
    name: String,
}

impl Stochastic {
    pub fn new(period: usize, smooth_k: usize, smooth_d: usize) -> Self {
        assert!(
            period >= 1 && smooth_k >= 1 && smooth_d >= 1,
            "Stochastic periods must be >= 1"
        );
        Self {
            period,
            smooth_k,
            smooth_d,
            name: format!("stochastic_{period}_{smooth_k}_{smooth_d}"),
        }
    }

    /// Unsmoothed %K, defined from index period - 1.
    pub fn raw_k(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[(i + 1 - self.period)..=i];
            let mut highest = f64::NEG_INFINITY;
            let mut lowest = f64::INFINITY;
            let mut has_nan = false;
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                highest = highest.max(bar.high);
                lowest = lowest.min(bar.low);
            }
            if has_nan || bars[i].close.is_nan() {
                continue;
            }
            result[i] = 100.0 * guarded_div(bars[i].close - lowest, highest - lowest);
        }

        result
    }

    pub fn lines(&self, bars: &[Bar]) -> StochasticOutput {
        let k = sma_of_series(&self.raw_k(bars), self.smooth_k);
        let d = sma_of_series(&k, self.smooth_d);
        StochasticOutput { k, d }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + self.smooth_k - 2
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let lines = self.lines(bars);
        let mut out = IndicatorValues::new();
        out.insert(field::STOCH_K, lines.k);
        out.insert(field::STOCH_D, lines.d);
        out
    }
}
