//! Indicator kinds and their parameter records.
//!
//! - `IndicatorKind`: the six supported indicators (enum dispatch, no string lookup).
//! - Per-indicator parameter structs with the chart's default values.
//! - `IndicatorParams`: tagged union of one indicator's parameters.
//! - `ParameterSet`: partial map indicator → parameters, the shape stored in presets.
//!
//! Serialized names follow the dashboard's storage format (`MA`, `RSI`,
//! `BollingerBands`, ... with camelCase fields) so preset files stay
//! interchangeable.

pub mod form;
pub mod rules;
pub mod validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use form::ParameterForm;
pub use rules::{param_names, rule_for, ParamRule};
pub use validate::{parse_periods, validate_parameter, validate_raw, ParamValue, ValidationError};

// ─── IndicatorKind ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "MA")]
    Ma,
    #[serde(rename = "RSI")]
    Rsi,
    BollingerBands,
    #[serde(rename = "MACD")]
    Macd,
    Stochastic,
    #[serde(rename = "ADX")]
    Adx,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::Ma,
        IndicatorKind::Rsi,
        IndicatorKind::BollingerBands,
        IndicatorKind::Macd,
        IndicatorKind::Stochastic,
        IndicatorKind::Adx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Ma => "MA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::BollingerBands => "BollingerBands",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Stochastic => "Stochastic",
            IndicatorKind::Adx => "ADX",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown indicator: {0}")]
pub struct UnknownIndicator(pub String);

impl FromStr for IndicatorKind {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ma" | "sma" => Ok(IndicatorKind::Ma),
            "rsi" => Ok(IndicatorKind::Rsi),
            "bollingerbands" | "bollinger" | "bb" => Ok(IndicatorKind::BollingerBands),
            "macd" => Ok(IndicatorKind::Macd),
            "stochastic" | "stoch" => Ok(IndicatorKind::Stochastic),
            "adx" | "dmi" => Ok(IndicatorKind::Adx),
            _ => Err(UnknownIndicator(s.to_string())),
        }
    }
}

// ─── Parameter records ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaParams {
    pub periods: Vec<usize>,
}

impl Default for MaParams {
    fn default() -> Self {
        Self {
            periods: vec![20, 50],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StochasticParams {
    pub period: usize,
    pub smooth_k: usize,
    pub smooth_d: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            period: 14,
            smooth_k: 3,
            smooth_d: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdxParams {
    pub period: usize,
}

impl Default for AdxParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

// ─── IndicatorParams ────────────────────────────────────────────────

/// Parameters for exactly one indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorParams {
    Ma(MaParams),
    Rsi(RsiParams),
    BollingerBands(BollingerParams),
    Macd(MacdParams),
    Stochastic(StochasticParams),
    Adx(AdxParams),
}

impl IndicatorParams {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorParams::Ma(_) => IndicatorKind::Ma,
            IndicatorParams::Rsi(_) => IndicatorKind::Rsi,
            IndicatorParams::BollingerBands(_) => IndicatorKind::BollingerBands,
            IndicatorParams::Macd(_) => IndicatorKind::Macd,
            IndicatorParams::Stochastic(_) => IndicatorKind::Stochastic,
            IndicatorParams::Adx(_) => IndicatorKind::Adx,
        }
    }

    pub fn default_for(kind: IndicatorKind) -> Self {
        match kind {
            IndicatorKind::Ma => IndicatorParams::Ma(MaParams::default()),
            IndicatorKind::Rsi => IndicatorParams::Rsi(RsiParams::default()),
            IndicatorKind::BollingerBands => {
                IndicatorParams::BollingerBands(BollingerParams::default())
            }
            IndicatorKind::Macd => IndicatorParams::Macd(MacdParams::default()),
            IndicatorKind::Stochastic => IndicatorParams::Stochastic(StochasticParams::default()),
            IndicatorKind::Adx => IndicatorParams::Adx(AdxParams::default()),
        }
    }

    /// Store an already-validated value under `param`.
    pub fn apply(&mut self, param: &str, value: ParamValue) -> Result<(), ValidationError> {
        let kind = self.kind();
        let unknown = || ValidationError::UnknownParameter {
            kind,
            param: param.to_string(),
        };
        match (self, param, value) {
            (IndicatorParams::Ma(p), "periods", ParamValue::Periods(v)) => p.periods = v,
            (IndicatorParams::Rsi(p), "period", ParamValue::Integer(v)) => p.period = v,
            (IndicatorParams::BollingerBands(p), "period", ParamValue::Integer(v)) => p.period = v,
            (IndicatorParams::BollingerBands(p), "stdDev", ParamValue::Number(v)) => p.std_dev = v,
            (IndicatorParams::Macd(p), "fastPeriod", ParamValue::Integer(v)) => p.fast_period = v,
            (IndicatorParams::Macd(p), "slowPeriod", ParamValue::Integer(v)) => p.slow_period = v,
            (IndicatorParams::Macd(p), "signalPeriod", ParamValue::Integer(v)) => {
                p.signal_period = v
            }
            (IndicatorParams::Stochastic(p), "period", ParamValue::Integer(v)) => p.period = v,
            (IndicatorParams::Stochastic(p), "smoothK", ParamValue::Integer(v)) => p.smooth_k = v,
            (IndicatorParams::Stochastic(p), "smoothD", ParamValue::Integer(v)) => p.smooth_d = v,
            (IndicatorParams::Adx(p), "period", ParamValue::Integer(v)) => p.period = v,
            _ => return Err(unknown()),
        }
        Ok(())
    }

    /// Every field of this record as (name, value) pairs, in form order.
    pub fn fields(&self) -> Vec<(&'static str, ParamValue)> {
        match self {
            IndicatorParams::Ma(p) => vec![("periods", ParamValue::Periods(p.periods.clone()))],
            IndicatorParams::Rsi(p) => vec![("period", ParamValue::Integer(p.period))],
            IndicatorParams::BollingerBands(p) => vec![
                ("period", ParamValue::Integer(p.period)),
                ("stdDev", ParamValue::Number(p.std_dev)),
            ],
            IndicatorParams::Macd(p) => vec![
                ("fastPeriod", ParamValue::Integer(p.fast_period)),
                ("slowPeriod", ParamValue::Integer(p.slow_period)),
                ("signalPeriod", ParamValue::Integer(p.signal_period)),
            ],
            IndicatorParams::Stochastic(p) => vec![
                ("period", ParamValue::Integer(p.period)),
                ("smoothK", ParamValue::Integer(p.smooth_k)),
                ("smoothD", ParamValue::Integer(p.smooth_d)),
            ],
            IndicatorParams::Adx(p) => vec![("period", ParamValue::Integer(p.period))],
        }
    }

    /// Check every field against its bounds rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let kind = self.kind();
        for (name, value) in self.fields() {
            validate::check_value(kind, name, &value)?;
        }
        Ok(())
    }
}

// ─── ParameterSet ───────────────────────────────────────────────────

/// Partial map of indicator → parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(rename = "MA", default, skip_serializing_if = "Option::is_none")]
    pub ma: Option<MaParams>,
    #[serde(rename = "RSI", default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiParams>,
    #[serde(rename = "BollingerBands", default, skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerParams>,
    #[serde(rename = "MACD", default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdParams>,
    #[serde(rename = "Stochastic", default, skip_serializing_if = "Option::is_none")]
    pub stochastic: Option<StochasticParams>,
    #[serde(rename = "ADX", default, skip_serializing_if = "Option::is_none")]
    pub adx: Option<AdxParams>,
}

impl ParameterSet {
    /// A set holding the default parameters of every indicator.
    pub fn defaults() -> Self {
        let mut set = Self::default();
        for kind in IndicatorKind::ALL {
            set.insert(IndicatorParams::default_for(kind));
        }
        set
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<IndicatorParams> {
        match kind {
            IndicatorKind::Ma => self.ma.clone().map(IndicatorParams::Ma),
            IndicatorKind::Rsi => self.rsi.clone().map(IndicatorParams::Rsi),
            IndicatorKind::BollingerBands => {
                self.bollinger.clone().map(IndicatorParams::BollingerBands)
            }
            IndicatorKind::Macd => self.macd.clone().map(IndicatorParams::Macd),
            IndicatorKind::Stochastic => self.stochastic.clone().map(IndicatorParams::Stochastic),
            IndicatorKind::Adx => self.adx.clone().map(IndicatorParams::Adx),
        }
    }

    pub fn insert(&mut self, params: IndicatorParams) {
        match params {
            IndicatorParams::Ma(p) => self.ma = Some(p),
            IndicatorParams::Rsi(p) => self.rsi = Some(p),
            IndicatorParams::BollingerBands(p) => self.bollinger = Some(p),
            IndicatorParams::Macd(p) => self.macd = Some(p),
            IndicatorParams::Stochastic(p) => self.stochastic = Some(p),
            IndicatorParams::Adx(p) => self.adx = Some(p),
        }
    }

    /// Overlay every entry of `other` onto `self`.
    pub fn merge(&mut self, other: &ParameterSet) {
        for params in other.entries() {
            self.insert(params);
        }
    }

    /// Present entries, in `IndicatorKind::ALL` order.
    pub fn entries(&self) -> Vec<IndicatorParams> {
        IndicatorKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind))
            .collect()
    }

    pub fn kinds(&self) -> Vec<IndicatorKind> {
        self.entries().iter().map(|p| p.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.entries().iter().try_for_each(|p| p.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("MA".parse::<IndicatorKind>().unwrap(), IndicatorKind::Ma);
        assert_eq!("bb".parse::<IndicatorKind>().unwrap(), IndicatorKind::BollingerBands);
        assert_eq!(" Stoch ".parse::<IndicatorKind>().unwrap(), IndicatorKind::Stochastic);
        assert!("ichimoku".parse::<IndicatorKind>().is_err());
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in IndicatorKind::ALL {
            assert_eq!(kind.to_string().parse::<IndicatorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parameter_set_uses_storage_keys() {
        let mut set = ParameterSet::default();
        set.insert(IndicatorParams::BollingerBands(BollingerParams {
            period: 10,
            std_dev: 1.5,
        }));
        set.insert(IndicatorParams::Macd(MacdParams::default()));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["BollingerBands"]["stdDev"], 1.5);
        assert_eq!(json["MACD"]["fastPeriod"], 12);
        assert!(json.get("RSI").is_none());
    }

    #[test]
    fn parameter_set_parses_partial_json() {
        let set: ParameterSet =
            serde_json::from_str(r#"{"RSI":{"period":7},"MA":{"periods":[5,10]}}"#).unwrap();
        assert_eq!(set.kinds(), vec![IndicatorKind::Ma, IndicatorKind::Rsi]);
        assert_eq!(set.rsi, Some(RsiParams { period: 7 }));
    }

    #[test]
    fn apply_rejects_mismatched_names() {
        let mut p = IndicatorParams::default_for(IndicatorKind::Rsi);
        let err = p.apply("fastPeriod", ParamValue::Integer(3)).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownParameter { .. }));
        p.apply("period", ParamValue::Integer(21)).unwrap();
        assert_eq!(p, IndicatorParams::Rsi(RsiParams { period: 21 }));
    }

    #[test]
    fn defaults_are_valid() {
        ParameterSet::defaults().validate().unwrap();
    }

    #[test]
    fn out_of_range_record_fails_validation() {
        let p = IndicatorParams::Adx(AdxParams { period: 1 });
        assert_eq!(
            p.validate().unwrap_err().to_string(),
            "Value must be between 2 and 100"
        );
    }
}
