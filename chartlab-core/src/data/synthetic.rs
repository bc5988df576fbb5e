//! Deterministic synthetic bars for demos, tests, and benchmarks.
//!
//! The RNG seed is the blake3 hash of a label, so the same label and length
//! always produce the same series.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Bar;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSeries {
    pub label: String,
    pub len: usize,
    pub start: DateTime<Utc>,
    pub interval: Duration,
    pub start_price: f64,
    /// Largest absolute per-bar return.
    pub max_move: f64,
}

impl SyntheticSeries {
    pub fn new(label: &str, len: usize) -> Self {
        Self {
            label: label.to_string(),
            len,
            start: Utc
                .with_ymd_and_hms(2024, 1, 2, 14, 30, 0)
                .single()
                .unwrap_or_default(),
            interval: Duration::minutes(1),
            start_price: 100.0,
            max_move: 0.03,
        }
    }

    /// Random-walk OHLCV series: each open is the previous close.
    pub fn generate(&self) -> Vec<Bar> {
        let seed: [u8; 32] = *blake3::hash(self.label.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::with_capacity(self.len);
        let mut price = self.start_price;
        let mut timestamp = self.start;

        for _ in 0..self.len {
            let ret: f64 = if self.max_move > 0.0 {
                rng.gen_range(-self.max_move..self.max_move)
            } else {
                0.0
            };
            let open = price;
            let close = price * (1.0 + ret);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64) as f64;

            bars.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });

            price = close;
            timestamp += self.interval;
        }

        tracing::debug!(label = %self.label, bars = bars.len(), "generated synthetic bars");
        bars
    }
}

/// `len` one-minute bars seeded from `label`.
pub fn synthetic_bars(label: &str, len: usize) -> Vec<Bar> {
    SyntheticSeries::new(label, len).generate()
}
