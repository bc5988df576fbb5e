//! Bounds rules for every (indicator, parameter) pair.

use super::IndicatorKind;

/// Inclusive `[min, max]` bounds and the input step for one parameter.
///
/// An integral step (1) marks a whole-number parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRule {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRule {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_integral(&self) -> bool {
        self.step.fract() == 0.0
    }
}

const PERIOD_2_100: ParamRule = ParamRule::new(2.0, 100.0, 1.0);

/// Parameter names accepted for `kind`, in form order.
pub fn param_names(kind: IndicatorKind) -> &'static [&'static str] {
    match kind {
        IndicatorKind::Ma => &["periods"],
        IndicatorKind::Rsi => &["period"],
        IndicatorKind::BollingerBands => &["period", "stdDev"],
        IndicatorKind::Macd => &["fastPeriod", "slowPeriod", "signalPeriod"],
        IndicatorKind::Stochastic => &["period", "smoothK", "smoothD"],
        IndicatorKind::Adx => &["period"],
    }
}

/// The bounds rule for `param` of `kind`, or `None` for an unknown name.
pub fn rule_for(kind: IndicatorKind, param: &str) -> Option<ParamRule> {
    let rule = match (kind, param) {
        (IndicatorKind::Ma, "periods") => ParamRule::new(1.0, 500.0, 1.0),
        (IndicatorKind::Rsi, "period") => PERIOD_2_100,
        (IndicatorKind::BollingerBands, "period") => ParamRule::new(5.0, 100.0, 1.0),
        (IndicatorKind::BollingerBands, "stdDev") => ParamRule::new(0.1, 5.0, 0.1),
        (IndicatorKind::Macd, "fastPeriod" | "slowPeriod" | "signalPeriod") => PERIOD_2_100,
        (IndicatorKind::Stochastic, "period") => ParamRule::new(1.0, 100.0, 1.0),
        (IndicatorKind::Stochastic, "smoothK" | "smoothD") => ParamRule::new(1.0, 10.0, 1.0),
        (IndicatorKind::Adx, "period") => PERIOD_2_100,
        _ => return None,
    };
    Some(rule)
}
