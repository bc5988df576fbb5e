//! Enriched point — a bar plus the indicator fields computable at its index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Bar;

/// Output field names, matching the chart surface's data keys.
pub mod field {
    pub const RSI: &str = "rsi";
    pub const UPPER_BAND: &str = "upperBand";
    pub const MIDDLE_BAND: &str = "middleBand";
    pub const LOWER_BAND: &str = "lowerBand";
    pub const MACD: &str = "macd";
    pub const SIGNAL: &str = "signal";
    pub const HISTOGRAM: &str = "histogram";
    pub const STOCH_K: &str = "stochK";
    pub const STOCH_D: &str = "stochD";
    pub const ADX: &str = "adx";
    pub const PLUS_DI: &str = "plusDI";
    pub const MINUS_DI: &str = "minusDI";

    /// Field name for a moving average of the given period (`ma20`, `ma50`, ...).
    pub fn ma(period: usize) -> String {
        format!("ma{period}")
    }
}

/// A bar with a sparse set of indicator values.
///
/// A field is present only once its indicator's warm-up has elapsed at this
/// index. Absent fields are omitted from the JSON form; values are always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(flatten)]
    pub fields: BTreeMap<String, f64>,
}

impl EnrichedPoint {
    pub fn new(bar: Bar) -> Self {
        Self {
            bar,
            fields: BTreeMap::new(),
        }
    }

    /// Record `value` under `name` if it is finite; NaN means "not yet computable".
    pub fn set(&mut self, name: &str, value: f64) {
        if value.is_finite() {
            self.fields.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    pub fn ma(&self, period: usize) -> Option<f64> {
        self.get(&field::ma(period))
    }

    pub fn rsi(&self) -> Option<f64> {
        self.get(field::RSI)
    }

    pub fn macd(&self) -> Option<f64> {
        self.get(field::MACD)
    }

    pub fn signal(&self) -> Option<f64> {
        self.get(field::SIGNAL)
    }

    pub fn histogram(&self) -> Option<f64> {
        self.get(field::HISTOGRAM)
    }

    pub fn adx(&self) -> Option<f64> {
        self.get(field::ADX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar() -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
            volume: 100.0,
        }
    }

    #[test]
    fn nan_is_not_recorded() {
        let mut p = EnrichedPoint::new(bar());
        p.set(field::RSI, f64::NAN);
        p.set(field::ADX, f64::INFINITY);
        assert!(p.fields.is_empty());
        p.set(&field::ma(20), 10.25);
        assert_eq!(p.ma(20), Some(10.25));
    }

    #[test]
    fn serializes_flat_with_chart_keys() {
        let mut p = EnrichedPoint::new(bar());
        p.set(field::UPPER_BAND, 12.0);
        p.set(&field::ma(5), 10.0);
        let json: serde_json::Value = serde_json::to_value(&p).unwrap();
        assert_eq!(json["close"], 10.5);
        assert_eq!(json["upperBand"], 12.0);
        assert_eq!(json["ma5"], 10.0);
        assert!(json.get("rsi").is_none());
    }
}
