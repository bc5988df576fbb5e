//! Indicator pipeline — parameters in, enriched points out.
//!
//! `compute_indicator` dispatches on the `IndicatorParams` variant;
//! `enrich` runs every requested indicator over one bar snapshot and merges
//! the results into points aligned by index with the input.
//!
//! Calculator constructors assert on impossible periods, so the entry points
//! that take a `ParameterSet` bounds-check it first.

use serde::{Deserialize, Serialize};

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Bar, EnrichedPoint};
use crate::indicators::{Adx, Bollinger, Macd, Rsi, SignalWarmup, Sma, Stochastic};
use crate::params::{IndicatorKind, IndicatorParams, ParameterSet, ValidationError};

/// Knobs that change calculator behavior without being user parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeOptions {
    pub macd_signal: SignalWarmup,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("No parameters supplied for {0}")]
    MissingParameters(IndicatorKind),

    #[error("Invalid {kind} parameters: {source}")]
    InvalidParameters {
        kind: IndicatorKind,
        #[source]
        source: ValidationError,
    },
}

fn checked(set: &ParameterSet, kind: IndicatorKind) -> Result<IndicatorParams, PipelineError> {
    let params = set.get(kind).ok_or(PipelineError::MissingParameters(kind))?;
    params
        .validate()
        .map_err(|source| PipelineError::InvalidParameters { kind, source })?;
    Ok(params)
}

/// Build the calculators for one parameter record.
///
/// MA yields one calculator per configured period.
pub fn build_indicators(
    params: &IndicatorParams,
    options: &ComputeOptions,
) -> Vec<Box<dyn Indicator>> {
    match params {
        IndicatorParams::Ma(p) => p
            .periods
            .iter()
            .map(|&period| Box::new(Sma::new(period)) as Box<dyn Indicator>)
            .collect(),
        IndicatorParams::Rsi(p) => vec![Box::new(Rsi::new(p.period))],
        IndicatorParams::BollingerBands(p) => vec![Box::new(Bollinger::new(p.period, p.std_dev))],
        IndicatorParams::Macd(p) => vec![Box::new(
            Macd::new(p.fast_period, p.slow_period, p.signal_period)
                .with_warmup(options.macd_signal),
        )],
        IndicatorParams::Stochastic(p) => {
            vec![Box::new(Stochastic::new(p.period, p.smooth_k, p.smooth_d))]
        }
        IndicatorParams::Adx(p) => vec![Box::new(Adx::new(p.period))],
    }
}

/// Compute every output field of one indicator over `bars`.
pub fn compute_indicator(
    params: &IndicatorParams,
    bars: &[Bar],
    options: &ComputeOptions,
) -> IndicatorValues {
    let mut out = IndicatorValues::new();
    for indicator in build_indicators(params, options) {
        tracing::debug!(
            indicator = indicator.name(),
            bars = bars.len(),
            lookback = indicator.lookback(),
            "computing indicator"
        );
        out.merge(indicator.compute(bars));
    }
    out
}

/// Compute `kind` using its entry in `set`.
pub fn compute_for(
    kind: IndicatorKind,
    set: &ParameterSet,
    bars: &[Bar],
    options: &ComputeOptions,
) -> Result<IndicatorValues, PipelineError> {
    let params = checked(set, kind)?;
    Ok(compute_indicator(&params, bars, options))
}

/// Run every indicator in `params` and merge the results into enriched points.
pub fn enrich(
    bars: &[Bar],
    params: &[IndicatorParams],
    options: &ComputeOptions,
) -> Vec<EnrichedPoint> {
    let mut values = IndicatorValues::new();
    for p in params {
        values.merge(compute_indicator(p, bars, options));
    }
    let mut points: Vec<EnrichedPoint> = bars.iter().cloned().map(EnrichedPoint::new).collect();
    values.apply_to(&mut points);
    points
}

/// Enrich `bars` with the `active` indicators taken from `set`.
pub fn enrich_with_set(
    bars: &[Bar],
    active: &[IndicatorKind],
    set: &ParameterSet,
    options: &ComputeOptions,
) -> Result<Vec<EnrichedPoint>, PipelineError> {
    let params = active
        .iter()
        .map(|&kind| checked(set, kind))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(enrich(bars, &params, options))
}
