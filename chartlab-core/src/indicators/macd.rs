//! MACD — difference of two simple moving averages plus a signal line.
//!
//! macd = MA(fast) - MA(slow), defined from max(fast, slow) - 1.
//! signal = MA(signal_period) over the macd series.
//! histogram = macd - signal, wherever both exist.
//!
//! The signal line's warm-up follows [`SignalWarmup`]. The default
//! (`ZeroFill`) averages the not-yet-defined macd prefix as zeros, so the
//! signal appears from index `signal_period - 1`; `Strict` averages only real
//! macd values.

use serde::{Deserialize, Serialize};

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{field, Bar};
use crate::indicators::{sma_of_series, Sma};

/// How the signal line treats the macd warm-up prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalWarmup {
    /// Missing macd entries count as 0.0 inside the signal window.
    #[default]
    ZeroFill,
    /// The signal starts only once `signal_period` real macd values exist.
    Strict,
}

/// Output series of [`Macd`].
#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    warmup: SignalWarmup,
    name: String,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        assert!(
            fast_period >= 1 && slow_period >= 1 && signal_period >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            fast_period,
            slow_period,
            signal_period,
            warmup: SignalWarmup::default(),
            name: format!("macd_{fast_period}_{slow_period}_{signal_period}"),
        }
    }

    pub fn with_warmup(mut self, warmup: SignalWarmup) -> Self {
        self.warmup = warmup;
        self
    }

    /// First index where the macd line itself is defined.
    pub fn macd_start(&self) -> usize {
        self.fast_period.max(self.slow_period) - 1
    }

    pub fn lines(&self, bars: &[Bar]) -> MacdOutput {
        let n = bars.len();
        let fast = Sma::new(self.fast_period).values(bars);
        let slow = Sma::new(self.slow_period).values(bars);

        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

        let signal = match self.warmup {
            SignalWarmup::ZeroFill => {
                let filled: Vec<f64> = (0..n)
                    .map(|i| if i < self.macd_start() { 0.0 } else { macd[i] })
                    .collect();
                sma_of_series(&filled, self.signal_period)
            }
            SignalWarmup::Strict => sma_of_series(&macd, self.signal_period),
        };

        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        MacdOutput {
            macd,
            signal,
            histogram,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.macd_start()
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let lines = self.lines(bars);
        let mut out = IndicatorValues::new();
        out.insert(field::MACD, lines.macd);
        out.insert(field::SIGNAL, lines.signal);
        out.insert(field::HISTOGRAM, lines.histogram);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64) * 0.5 + ((i % 3) as f64))
            .collect();
        make_bars(&closes)
    }

    #[test]
    fn macd_is_fast_minus_slow() {
        let bars = ramp(40);
        let out = Macd::new(3, 6, 4).lines(&bars);
        let fast = Sma::new(3).values(&bars);
        let slow = Sma::new(6).values(&bars);
        for i in 0..5 {
            assert!(out.macd[i].is_nan());
        }
        for i in 5..bars.len() {
            assert_approx(out.macd[i], fast[i] - slow[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn zero_fill_signal_starts_early() {
        let bars = ramp(40);
        let out = Macd::new(3, 6, 4).lines(&bars);
        // Signal window [0..=3] is all zero-filled prefix.
        assert!(out.signal[2].is_nan());
        assert_approx(out.signal[3], 0.0, DEFAULT_EPSILON);
        // Window [2..=5] holds three zeros and macd[5].
        assert_approx(out.signal[5], out.macd[5] / 4.0, DEFAULT_EPSILON);
        // No histogram where macd is missing.
        assert!(out.histogram[4].is_nan());
        assert!(!out.histogram[5].is_nan());
    }

    #[test]
    fn strict_signal_waits_for_real_values() {
        let bars = ramp(40);
        let out = Macd::new(3, 6, 4)
            .with_warmup(SignalWarmup::Strict)
            .lines(&bars);
        // macd from 5, signal needs 4 of them → first at 8.
        assert!(out.signal[7].is_nan());
        let expected = (out.macd[5] + out.macd[6] + out.macd[7] + out.macd[8]) / 4.0;
        assert_approx(out.signal[8], expected, 1e-9);
        assert!(out.histogram[7].is_nan());
    }

    #[test]
    fn histogram_identity() {
        let bars = ramp(60);
        let out = Macd::new(12, 26, 9).lines(&bars);
        for i in 0..bars.len() {
            if !out.macd[i].is_nan() && !out.signal[i].is_nan() {
                assert_approx(out.histogram[i], out.macd[i] - out.signal[i], DEFAULT_EPSILON);
            } else {
                assert!(out.histogram[i].is_nan());
            }
        }
    }

    #[test]
    fn inverted_periods_still_compute() {
        // fast > slow is the caller's business; macd starts at the longer window.
        let bars = ramp(30);
        let macd = Macd::new(10, 4, 3);
        assert_eq!(macd.macd_start(), 9);
        let out = macd.lines(&bars);
        assert!(out.macd[8].is_nan());
        assert!(!out.macd[9].is_nan());
    }
}
