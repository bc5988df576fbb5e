//! Built-in presets, seeded into every store.

use crate::params::{
    AdxParams, BollingerParams, IndicatorParams, MacdParams, MaParams, ParameterSet, RsiParams,
    StochasticParams,
};

use super::Preset;

fn set(entries: Vec<IndicatorParams>) -> ParameterSet {
    let mut set = ParameterSet::default();
    for entry in entries {
        set.insert(entry);
    }
    set
}

/// The fixed built-in presets, in display order.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::builtin(
            "Default",
            "Standard settings for every indicator",
            ParameterSet::defaults(),
        ),
        Preset::builtin(
            "Scalping",
            "Short windows for fast intraday charts",
            set(vec![
                IndicatorParams::Ma(MaParams {
                    periods: vec![5, 10],
                }),
                IndicatorParams::Rsi(RsiParams { period: 7 }),
                IndicatorParams::BollingerBands(BollingerParams {
                    period: 10,
                    std_dev: 1.5,
                }),
                IndicatorParams::Macd(MacdParams {
                    fast_period: 5,
                    slow_period: 13,
                    signal_period: 4,
                }),
                IndicatorParams::Stochastic(StochasticParams {
                    period: 5,
                    smooth_k: 3,
                    smooth_d: 3,
                }),
            ]),
        ),
        Preset::builtin(
            "Swing Trading",
            "Multi-day trends with standard oscillators",
            set(vec![
                IndicatorParams::Ma(MaParams {
                    periods: vec![20, 50, 100],
                }),
                IndicatorParams::Rsi(RsiParams { period: 14 }),
                IndicatorParams::Macd(MacdParams::default()),
                IndicatorParams::Adx(AdxParams { period: 14 }),
            ]),
        ),
        Preset::builtin(
            "Position Trading",
            "Long windows for weekly and monthly trends",
            set(vec![
                IndicatorParams::Ma(MaParams {
                    periods: vec![50, 200],
                }),
                IndicatorParams::Rsi(RsiParams { period: 21 }),
                IndicatorParams::BollingerBands(BollingerParams {
                    period: 50,
                    std_dev: 2.5,
                }),
                IndicatorParams::Macd(MacdParams {
                    fast_period: 19,
                    slow_period: 39,
                    signal_period: 9,
                }),
                IndicatorParams::Adx(AdxParams { period: 20 }),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtins_are_valid_and_unique() {
        let presets = builtin_presets();
        let names: HashSet<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), presets.len());
        for preset in &presets {
            assert!(!preset.is_custom);
            preset
                .parameters
                .validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", preset.name));
        }
    }
}
