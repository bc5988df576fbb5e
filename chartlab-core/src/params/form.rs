//! Parameter edit form — validates edits field by field.
//!
//! A rejected edit records a per-field error and leaves the last valid value
//! in place. While any error is recorded the form refuses to produce a
//! preview, so nothing downstream recomputes on bad input. Loaded parameter
//! sets go through the same bounds checks field by field.

use std::collections::BTreeMap;

use crate::domain::{Bar, EnrichedPoint};
use crate::pipeline::{enrich, ComputeOptions};

use super::validate::{check_value, validate_parameter, ValidationError};
use super::{IndicatorKind, IndicatorParams, ParameterSet};

#[derive(Debug, Clone, Default)]
pub struct ParameterForm {
    values: ParameterSet,
    errors: BTreeMap<(IndicatorKind, String), ValidationError>,
}

impl ParameterForm {
    /// A form holding `initial`; out-of-range fields are recorded as errors.
    pub fn new(initial: ParameterSet) -> Self {
        let mut form = Self::default();
        form.load(&initial);
        form
    }

    /// Validate `raw` and store it on success; otherwise record the error.
    pub fn set(
        &mut self,
        kind: IndicatorKind,
        param: &str,
        raw: &str,
    ) -> Result<(), ValidationError> {
        let key = (kind, param.to_string());
        let result = validate_parameter(kind, param, raw).and_then(|value| {
            let mut params = self
                .values
                .get(kind)
                .unwrap_or_else(|| IndicatorParams::default_for(kind));
            params.apply(param, value)?;
            self.values.insert(params);
            Ok(())
        });

        match &result {
            Ok(()) => {
                self.errors.remove(&key);
            }
            Err(e) => {
                tracing::warn!(%kind, param, raw, error = %e, "rejected parameter edit");
                self.errors.insert(key, e.clone());
            }
        }
        result
    }

    /// Replace the parameters of every indicator present in `params`,
    /// dropping stale errors for those indicators.
    ///
    /// Each field is bounds-checked: a valid value is taken, an invalid one is
    /// recorded as that field's error and the current (or default) value stays.
    pub fn load(&mut self, params: &ParameterSet) {
        for loaded in params.entries() {
            let kind = loaded.kind();
            self.errors.retain(|(k, _), _| *k != kind);

            let mut current = self
                .values
                .get(kind)
                .unwrap_or_else(|| IndicatorParams::default_for(kind));
            for (name, value) in loaded.fields() {
                let checked = check_value(kind, name, &value)
                    .and_then(|()| current.apply(name, value));
                if let Err(e) = checked {
                    tracing::warn!(%kind, param = name, error = %e, "rejected loaded parameter");
                    self.errors.insert((kind, name.to_string()), e);
                }
            }
            self.values.insert(current);
        }
    }

    pub fn values(&self) -> &ParameterSet {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<(IndicatorKind, String), ValidationError> {
        &self.errors
    }

    pub fn error_for(&self, kind: IndicatorKind, param: &str) -> Option<&ValidationError> {
        self.errors.get(&(kind, param.to_string()))
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recompute `active` indicators with the current values.
    ///
    /// Returns `None` while any field is in error or an active indicator has
    /// no parameters.
    pub fn preview(
        &self,
        bars: &[Bar],
        active: &[IndicatorKind],
        options: &ComputeOptions,
    ) -> Option<Vec<EnrichedPoint>> {
        if self.has_errors() {
            return None;
        }
        let params: Option<Vec<IndicatorParams>> =
            active.iter().map(|&kind| self.values.get(kind)).collect();
        Some(enrich(bars, &params?, options))
    }
}
