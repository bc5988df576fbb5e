//! Chart configuration — which indicators run, with which parameters.
//!
//! Stored as TOML; every key is optional:
//!
//! ```toml
//! preset_dir = ".chartlab"
//! active = ["MA", "RSI", "MACD"]
//! preset = "Swing Trading"
//! macd_signal = "strict"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::indicators::SignalWarmup;
use crate::params::{IndicatorKind, ParameterSet};
use crate::pipeline::ComputeOptions;
use crate::presets::PresetStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Directory holding the custom preset file.
    pub preset_dir: PathBuf,
    /// Indicators computed when the caller does not name any.
    pub active: Vec<IndicatorKind>,
    /// Preset supplying parameters; indicators it lacks use defaults.
    pub preset: Option<String>,
    pub macd_signal: SignalWarmup,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            preset_dir: PathBuf::from(".chartlab"),
            active: IndicatorKind::ALL.to_vec(),
            preset: Some("Default".to_string()),
            macd_signal: SignalWarmup::ZeroFill,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl ChartConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn compute_options(&self) -> ComputeOptions {
        ComputeOptions {
            macd_signal: self.macd_signal,
        }
    }

    /// Default parameters overlaid with the configured preset, if any.
    pub fn resolve_parameters(&self, store: &PresetStore) -> Result<ParameterSet, ConfigError> {
        let mut set = ParameterSet::defaults();
        if let Some(name) = &self.preset {
            let preset = store
                .get_parameters(name)
                .ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?;
            set.merge(preset);
        }
        Ok(set)
    }
}
