//! Parameter validation — raw form input to typed, in-bounds values.
//!
//! Scalar fields accept one number. The MA `periods` field accepts a
//! comma-separated list: entries that are not integers are dropped, and a
//! single out-of-range entry rejects the whole list.

use super::rules::{rule_for, ParamRule};
use super::{IndicatorKind, UnknownIndicator};

/// A validated parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(usize),
    Number(f64),
    Periods(Vec<usize>),
}

/// Field-scoped validation failure. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    #[error("Periods must be between {min} and {max}")]
    PeriodsOutOfRange { min: f64, max: f64 },

    #[error("Value must be a number")]
    NotANumber,

    #[error("Value must be a whole number")]
    NotWhole,

    #[error("Enter at least one period")]
    NoPeriods,

    #[error("Unknown parameter '{param}' for {kind}")]
    UnknownParameter { kind: IndicatorKind, param: String },

    #[error(transparent)]
    UnknownIndicator(#[from] UnknownIndicator),
}

/// Validate raw input for `param` of `kind`.
pub fn validate_parameter(
    kind: IndicatorKind,
    param: &str,
    raw: &str,
) -> Result<ParamValue, ValidationError> {
    let rule = rule_for(kind, param).ok_or_else(|| ValidationError::UnknownParameter {
        kind,
        param: param.to_string(),
    })?;

    if kind == IndicatorKind::Ma {
        return parse_periods(raw, &rule).map(ParamValue::Periods);
    }

    let value: f64 = raw.trim().parse().map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    scalar(value, &rule)
}

/// Like [`validate_parameter`], with the indicator given by name.
pub fn validate_raw(kind: &str, param: &str, raw: &str) -> Result<ParamValue, ValidationError> {
    let kind: IndicatorKind = kind.parse()?;
    validate_parameter(kind, param, raw)
}

/// Parse a comma-separated period list and bounds-check every entry.
///
/// Each entry contributes its leading integer (`"20.5"` and `"20d"` read as
/// 20); entries without one are dropped.
pub fn parse_periods(raw: &str, rule: &ParamRule) -> Result<Vec<usize>, ValidationError> {
    let parsed: Vec<i64> = raw.split(',').filter_map(leading_integer).collect();

    if parsed.is_empty() {
        return Err(ValidationError::NoPeriods);
    }

    if parsed.iter().any(|&p| !rule.contains(p as f64)) {
        return Err(ValidationError::PeriodsOutOfRange {
            min: rule.min,
            max: rule.max,
        });
    }

    Ok(parsed.into_iter().map(|p| p as usize).collect())
}

/// The optionally signed run of digits at the start of `part`.
///
/// Digit runs too long for `i64` saturate, so they still fail the range check.
fn leading_integer(part: &str) -> Option<i64> {
    let s = part.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let rest = unsigned.trim_start_matches(|c: char| c.is_ascii_digit());
    let digits = unsigned.len() - rest.len();
    if digits == 0 {
        return None;
    }
    let negative = s.starts_with('-');
    let value = unsigned[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Re-check an already typed value (e.g. one loaded from a preset file).
pub(crate) fn check_value(
    kind: IndicatorKind,
    param: &str,
    value: &ParamValue,
) -> Result<(), ValidationError> {
    let rule = rule_for(kind, param).ok_or_else(|| ValidationError::UnknownParameter {
        kind,
        param: param.to_string(),
    })?;
    match value {
        ParamValue::Periods(periods) => {
            if periods.is_empty() {
                return Err(ValidationError::NoPeriods);
            }
            if periods.iter().any(|&p| !rule.contains(p as f64)) {
                return Err(ValidationError::PeriodsOutOfRange {
                    min: rule.min,
                    max: rule.max,
                });
            }
            Ok(())
        }
        ParamValue::Integer(v) => scalar(*v as f64, &rule).map(|_| ()),
        ParamValue::Number(v) => scalar(*v, &rule).map(|_| ()),
    }
}

fn scalar(value: f64, rule: &ParamRule) -> Result<ParamValue, ValidationError> {
    if !rule.contains(value) {
        return Err(ValidationError::OutOfRange {
            min: rule.min,
            max: rule.max,
        });
    }
    if rule.is_integral() {
        if value.fract() != 0.0 {
            return Err(ValidationError::NotWhole);
        }
        return Ok(ParamValue::Integer(value as usize));
    }
    Ok(ParamValue::Number(value))
}
