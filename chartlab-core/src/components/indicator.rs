//! Indicator trait and the named-series container calculators write into.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Every call recomputes from scratch; nothing is carried between calls.

use crate::domain::{Bar, EnrichedPoint};
use std::collections::HashMap;

/// Trait for indicators.
///
/// `compute` returns one or more named output series, each the same length
/// as `bars`. Entries that are not yet computable are `f64::NAN`.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ma_20", "macd_12_26_9").
    fn name(&self) -> &str;

    /// Index of the first bar at which the primary output is defined.
    fn lookback(&self) -> usize;

    /// Compute every output series of this indicator.
    fn compute(&self, bars: &[Bar]) -> IndicatorValues;
}

/// Container for computed indicator series, keyed by output field name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Move every series of `other` into `self`, replacing same-named ones.
    pub fn merge(&mut self, other: IndicatorValues) {
        self.series.extend(other.series);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Attach every finite value to the point at its index.
    pub fn apply_to(&self, points: &mut [EnrichedPoint]) {
        for (name, values) in &self.series {
            for (point, &value) in points.iter_mut().zip(values) {
                point.set(name, value);
            }
        }
    }
}
