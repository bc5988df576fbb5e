//! Component traits.
//!
//! The indicator trait plus the named-series container that every calculator
//! writes into and the pipeline merges into enriched points.

pub mod indicator;

pub use indicator::{Indicator, IndicatorValues};
