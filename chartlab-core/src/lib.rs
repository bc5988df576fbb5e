//! ChartLab Core — indicator engine for OHLCV charts.
//!
//! - Domain types (bars, enriched points)
//! - Indicator calculators (MA, RSI, Bollinger Bands, MACD, Stochastic, ADX)
//! - Parameter rules, validation, and the editing form
//! - Named presets with JSON persistence
//! - Pipeline that merges indicator output into enriched points
//! - Bar loading and synthetic data

pub mod components;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod params;
pub mod pipeline;
pub mod presets;

pub use config::{ChartConfig, ConfigError};
pub use domain::{Bar, EnrichedPoint};
pub use params::{IndicatorKind, IndicatorParams, ParameterSet, ValidationError};
pub use pipeline::{enrich, enrich_with_set, ComputeOptions, PipelineError};
pub use presets::{Preset, PresetError, PresetStore};
