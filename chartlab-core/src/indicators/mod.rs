//! Concrete indicator implementations.
//!
//! All six indicators implement the `Indicator` trait from `components::indicator`
//! and also expose typed inherent accessors for direct use.
//!
//! Warm-up entries are `f64::NAN`. A zero denominator anywhere in a ratio is
//! replaced by 1 (see [`guarded_div`]); this keeps RSI, Stochastic and ADX on
//! one policy.

pub mod adx;
pub mod bollinger;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use adx::{Adx, AdxOutput};
pub use bollinger::{Bollinger, BollingerBands};
pub use macd::{Macd, MacdOutput, SignalWarmup};
pub use rsi::Rsi;
pub use sma::{sma_of_series, Sma};
pub use stochastic::{Stochastic, StochasticOutput};

/// `num / den`, substituting 1 for a zero denominator.
pub fn guarded_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        num
    } else {
        num / den
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let data: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_bars(&data)
}

/// Create bars from explicit (open, high, low, close) tuples, one minute apart.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| crate::domain::Bar {
            timestamp: base + chrono::Duration::minutes(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
