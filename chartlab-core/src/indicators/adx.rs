//! ADX — Average Directional Index with +DI / -DI (Wilder).
//!
//! Steps:
//! 1. True range and +DM / -DM for every bar after the first
//! 2. Seed smoothed TR, +DM, -DM with the mean of bars [0, period-1]
//!    (bar 0 has no predecessor and contributes zero)
//! 3. Wilder smoothing from index `period`: s = (s_prev * (period-1) + x) / period
//! 4. +DI = 100 * s(+DM) / s(TR), -DI = 100 * s(-DM) / s(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX seeded at 2*period-1 with the mean of DX over [period, 2*period-1],
//!    then Wilder-smoothed
//!
//! Lookback: 2 * period - 1 for ADX; the DI lines start at `period`.
//! Zero denominators are replaced by 1, so a range-less stretch gives
//! DI = 0 and DX = 0.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{field, Bar};
use crate::indicators::guarded_div;

/// Output series of [`Adx`].
#[derive(Debug, Clone)]
pub struct AdxOutput {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    /// Directional index, exposed for inspection; not an output field.
    pub dx: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

/// Per-bar directional movement and true range.
#[derive(Debug, Clone, Copy, Default)]
struct Movement {
    tr: f64,
    plus_dm: f64,
    minus_dm: f64,
}

impl Movement {
    fn between(prev: &Bar, bar: &Bar) -> Self {
        let tr = (bar.high - bar.low)
            .max((bar.high - prev.close).abs())
            .max((bar.low - prev.close).abs());

        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        let plus_dm = if up > down && up > 0.0 { up } else { 0.0 };
        let minus_dm = if down > up && down > 0.0 { down } else { 0.0 };

        Self {
            tr,
            plus_dm,
            minus_dm,
        }
    }

    fn is_nan(&self) -> bool {
        self.tr.is_nan() || self.plus_dm.is_nan() || self.minus_dm.is_nan()
    }
}

/// Wilder-smoothed running sums, local to one `compute` call.
#[derive(Debug, Clone, Copy, Default)]
struct Smoothed {
    tr: f64,
    plus_dm: f64,
    minus_dm: f64,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            name: format!("adx_{period}"),
        }
    }

    pub fn lines(&self, bars: &[Bar]) -> AdxOutput {
        let n = bars.len();
        let p = self.period;
        let pf = p as f64;
        let mut out = AdxOutput {
            adx: vec![f64::NAN; n],
            plus_di: vec![f64::NAN; n],
            minus_di: vec![f64::NAN; n],
            dx: vec![f64::NAN; n],
        };

        if n < p + 1 {
            return out;
        }

        let movement = |i: usize| {
            if i == 0 {
                Movement::default()
            } else {
                Movement::between(&bars[i - 1], &bars[i])
            }
        };

        // Seed from the first `period` bars.
        let mut s = Smoothed::default();
        for i in 0..p {
            let m = movement(i);
            s.tr += m.tr;
            s.plus_dm += m.plus_dm;
            s.minus_dm += m.minus_dm;
        }
        s.tr /= pf;
        s.plus_dm /= pf;
        s.minus_dm /= pf;

        let mut dx_sum = 0.0;
        let mut adx_prev = f64::NAN;

        for i in p..n {
            let m = movement(i);
            s.tr = (s.tr * (pf - 1.0) + m.tr) / pf;
            s.plus_dm = (s.plus_dm * (pf - 1.0) + m.plus_dm) / pf;
            s.minus_dm = (s.minus_dm * (pf - 1.0) + m.minus_dm) / pf;

            // Once a NaN bar enters the recurrence every later value is tainted.
            if m.is_nan() || s.tr.is_nan() {
                break;
            }

            let plus_di = 100.0 * guarded_div(s.plus_dm, s.tr);
            let minus_di = 100.0 * guarded_div(s.minus_dm, s.tr);
            let dx = 100.0 * guarded_div((plus_di - minus_di).abs(), plus_di + minus_di);

            out.plus_di[i] = plus_di;
            out.minus_di[i] = minus_di;
            out.dx[i] = dx;

            if i < 2 * p - 1 {
                dx_sum += dx;
            } else if i == 2 * p - 1 {
                adx_prev = (dx_sum + dx) / pf;
                out.adx[i] = adx_prev;
            } else {
                adx_prev = (adx_prev * (pf - 1.0) + dx) / pf;
                out.adx[i] = adx_prev;
            }
        }

        out
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        2 * self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let lines = self.lines(bars);
        let mut out = IndicatorValues::new();
        out.insert(field::ADX, lines.adx);
        out.insert(field::PLUS_DI, lines.plus_di);
        out.insert(field::MINUS_DI, lines.minus_di);
        out
    }
}
