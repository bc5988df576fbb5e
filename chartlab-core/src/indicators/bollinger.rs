//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: MA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{field, Bar};
use crate::indicators::Sma;

/// The three band series, each the same length as the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        }
    }

    pub fn bands(&self, bars: &[Bar]) -> BollingerBands {
        let n = bars.len();
        let middle = Sma::new(self.period).values(bars);
        let mut upper = vec![f64::NAN; n];
        let mut lower = vec![f64::NAN; n];

        for i in 0..n {
            let mean = middle[i];
            if mean.is_nan() {
                continue;
            }
            let window = &bars[(i + 1 - self.period)..=i];
            let variance: f64 = window
                .iter()
                .map(|bar| {
                    let diff = bar.close - mean;
                    diff * diff
                })
                .sum::<f64>()
                / self.period as f64;
            let width = self.multiplier * variance.sqrt();
            upper[i] = mean + width;
            lower[i] = mean - width;
        }

        BollingerBands {
            upper,
            middle,
            lower,
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let bands = self.bands(bars);
        let mut out = IndicatorValues::new();
        out.insert(field::UPPER_BAND, bands.upper);
        out.insert(field::MIDDLE_BAND, bands.middle);
        out.insert(field::LOWER_BAND, bands.lower);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn bollinger_known_window() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population stddev 2.
        let bars = make_bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let bands = Bollinger::new(8, 2.0).bands(&bars);
        assert!(bands.middle[6].is_nan());
        assert!(bands.upper[6].is_nan());
        assert_approx(bands.middle[7], 5.0, DEFAULT_EPSILON);
        assert_approx(bands.upper[7], 9.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[7], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_are_symmetric() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0, 13.0, 12.0]);
        let bands = Bollinger::new(5, 1.5).bands(&bars);
        for i in 4..bars.len() {
            let up = bands.upper[i] - bands.middle[i];
            let down = bands.middle[i] - bands.lower[i];
            assert_approx(up, down, 1e-9);
            assert!(up >= 0.0);
        }
    }

    #[test]
    fn flat_series_collapses_bands() {
        let bars = make_bars(&[50.0; 6]);
        let bands = Bollinger::new(5, 2.0).bands(&bars);
        assert_approx(bands.upper[5], 50.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[5], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn compute_emits_three_fields() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let out = Bollinger::new(5, 2.0).compute(&bars);
        assert_eq!(out.len(), 3);
        assert_eq!(out.get(field::MIDDLE_BAND, 4), Some(3.0));
    }

    #[test]
    fn bollinger_lookback() {
        assert_eq!(Bollinger::new(20, 2.0).lookback(), 19);
    }
}
