//! Relative Strength Index (RSI).
//!
//! Simple (non-Wilder) averages of gains and losses over the trailing window.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! A zero avg_loss is replaced by 1, so a loss-free window yields
//! RSI = 100 - 100 / (1 + avg_gain) rather than 100.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{field, Bar};
use crate::indicators::{guarded_div, sma_of_series};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    pub fn values(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // Index 0 has no prior bar: zero gain, zero loss.
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change.is_nan() {
                gains[i] = f64::NAN;
                losses[i] = f64::NAN;
            } else {
                gains[i] = change.max(0.0);
                losses[i] = (-change).max(0.0);
            }
        }

        let avg_gain = sma_of_series(&gains, self.period);
        let avg_loss = sma_of_series(&losses, self.period);

        for i in self.period..n {
            if avg_gain[i].is_nan() || avg_loss[i].is_nan() {
                continue;
            }
            let rs = guarded_div(avg_gain[i], avg_loss[i]);
            result[i] = 100.0 - 100.0 / (1.0 + rs);
        }

        result
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let mut out = IndicatorValues::new();
        out.insert(field::RSI, self.values(bars));
        out
    }
}
