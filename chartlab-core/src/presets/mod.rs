//! Named parameter presets — fixed built-ins plus user-defined customs.
//!
//! - Built-ins are seeded at construction and never change.
//! - Customs are inserted or overwritten by name; a custom may shadow a
//!   built-in name, and lookups prefer the custom.
//! - Deleting only touches customs.
//! - Customs round-trip through a JSON array (export/import and the file store).
//! - Presets read from JSON (import or the file store) are bounds-checked;
//!   an entry with an out-of-range value is skipped with a warning.

pub mod builtin;
pub mod storage;

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

pub use builtin::builtin_presets;
pub use storage::{load_custom, save_custom, CUSTOM_PRESETS_KEY};

/// A named, reusable bundle of indicator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub parameters: ParameterSet,
}

impl Preset {
    fn builtin(name: &str, description: &str, parameters: ParameterSet) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            is_custom: false,
            parameters,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("invalid preset JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize presets: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("preset file I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Built-in and custom presets for one session.
#[derive(Debug, Clone)]
pub struct PresetStore {
    builtins: Vec<Preset>,
    custom: Vec<Preset>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetStore {
    /// A store holding only the built-in presets.
    pub fn new() -> Self {
        Self {
            builtins: builtin_presets(),
            custom: Vec::new(),
        }
    }

    /// A store seeded with previously persisted custom presets.
    ///
    /// Entries with a blank name or out-of-range parameters are dropped.
    pub fn with_custom(custom: Vec<Preset>) -> Self {
        let mut store = Self::new();
        for preset in custom {
            store.save_checked(preset);
        }
        store
    }

    /// Built-ins first, then customs in insertion order.
    pub fn list(&self) -> Vec<&Preset> {
        self.builtins.iter().chain(self.custom.iter()).collect()
    }

    pub fn custom(&self) -> &[Preset] {
        &self.custom
    }

    /// Insert or overwrite a custom preset. Fails only for a blank name.
    pub fn save(&mut self, name: &str, parameters: ParameterSet, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let preset = Preset {
            name: name.to_string(),
            description: description.to_string(),
            is_custom: true,
            parameters,
        };

        match self.custom.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                tracing::info!(name, "overwriting custom preset");
                *existing = preset;
            }
            None => {
                tracing::info!(name, "saving custom preset");
                self.custom.push(preset);
            }
        }
        true
    }

    /// Remove a custom preset. Built-in names are left untouched.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|p| p.name != name);
        let removed = self.custom.len() != before;
        if removed {
            tracing::info!(name, "deleted custom preset");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.custom
            .iter()
            .find(|p| p.name == name)
            .or_else(|| self.builtins.iter().find(|p| p.name == name))
    }

    /// The parameter bundle of `name`, without its metadata.
    pub fn get_parameters(&self, name: &str) -> Option<&ParameterSet> {
        self.get(name).map(|p| &p.parameters)
    }

    /// Custom presets as a pretty JSON array.
    pub fn export_json(&self) -> Result<String, PresetError> {
        serde_json::to_string_pretty(&self.custom).map_err(PresetError::Serialize)
    }

    /// Parse a JSON array of presets and save each one.
    ///
    /// Malformed JSON fails the whole import and nothing is applied. Entries
    /// with a blank name or out-of-range parameters are skipped. Returns the
    /// number of presets saved.
    pub fn import_json(&mut self, json: &str) -> Result<usize, PresetError> {
        let presets: Vec<Preset> = serde_json::from_str(json).map_err(|e| {
            tracing::error!(error = %e, "preset import failed");
            PresetError::Parse(e)
        })?;

        let mut saved = 0;
        for preset in presets {
            if self.save_checked(preset) {
                saved += 1;
            }
        }
        tracing::info!(saved, "imported presets");
        Ok(saved)
    }

    /// Save a preset read from JSON, rejecting blank names and invalid values.
    fn save_checked(&mut self, preset: Preset) -> bool {
        if let Err(e) = preset.parameters.validate() {
            tracing::warn!(
                name = %preset.name,
                error = %e,
                "skipping preset with invalid parameters"
            );
            return false;
        }
        let saved = self.save(&preset.name, preset.parameters, &preset.description);
        if !saved {
            tracing::warn!("skipping preset with a blank name");
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{IndicatorKind, IndicatorParams, RsiParams};

    fn rsi_set(period: usize) -> ParameterSet {
        let mut set = ParameterSet::default();
        set.insert(IndicatorParams::Rsi(RsiParams { period }));
        set
    }

    #[test]
    fn list_puts_builtins_first() {
        let mut store = PresetStore::new();
        store.save("Mine", rsi_set(9), "");
        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Default"));
        assert_eq!(names.last(), Some(&"Mine"));
    }

    #[test]
    fn save_then_get_parameters() {
        let mut store = PresetStore::new();
        assert!(store.save("X", rsi_set(9), "d"));
        assert_eq!(store.get_parameters("X"), Some(&rsi_set(9)));
        assert!(store.get("X").unwrap().is_custom);
    }

    #[test]
    fn save_overwrites_by_name() {
        let mut store = PresetStore::new();
        store.save("X", rsi_set(9), "first");
        store.save("X", rsi_set(30), "second");
        assert_eq!(store.custom().len(), 1);
        assert_eq!(store.get("X").unwrap().description, "second");
        assert_eq!(store.get_parameters("X"), Some(&rsi_set(30)));
    }

    #[test]
    fn blank_name_rejected() {
        let mut store = PresetStore::new();
        assert!(!store.save("", rsi_set(9), ""));
        assert!(!store.save("   ", rsi_set(9), ""));
        assert!(store.custom().is_empty());
    }

    #[test]
    fn delete_custom_only() {
        let mut store = PresetStore::new();
        store.save("X", rsi_set(9), "");
        assert!(store.delete("X"));
        assert!(store.list().iter().all(|p| p.name != "X"));

        assert!(!store.delete("Default"));
        assert!(store.list().iter().any(|p| p.name == "Default"));
    }

    #[test]
    fn custom_shadows_builtin() {
        let mut store = PresetStore::new();
        assert!(store.save("Default", rsi_set(5), "mine"));
        assert_eq!(store.get_parameters("Default"), Some(&rsi_set(5)));
        // Both remain listed.
        assert_eq!(
            store.list().iter().filter(|p| p.name == "Default").count(),
            2
        );
        // Deleting the shadow reveals the built-in again.
        assert!(store.delete("Default"));
        let params = store.get_parameters("Default").unwrap();
        assert_eq!(params.kinds().len(), IndicatorKind::ALL.len());
    }

    #[test]
    fn export_import_round_trip() {
        let mut store = PresetStore::new();
        store.save("A", rsi_set(7), "alpha");
        store.save("B", ParameterSet::defaults(), "beta");
        let json = store.export_json().unwrap();

        let mut fresh = PresetStore::new();
        assert_eq!(fresh.import_json(&json).unwrap(), 2);
        assert_eq!(fresh.custom(), store.custom());
    }

    #[test]
    fn malformed_import_applies_nothing() {
        let mut store = PresetStore::new();
        let err = store
            .import_json(r#"[{"name":"ok","parameters":{}}, {"name": 5"#)
            .unwrap_err();
        assert!(matches!(err, PresetError::Parse(_)));
        assert!(store.custom().is_empty());
    }

    #[test]
    fn import_skips_out_of_range_presets() {
        let mut store = PresetStore::new();
        let json = r#"[
            {"name":"Bad","parameters":{"RSI":{"period":0},"MA":{"periods":[900]}}},
            {"name":"Good","parameters":{"RSI":{"period":10}}}
        ]"#;
        assert_eq!(store.import_json(json).unwrap(), 1);
        assert!(store.get("Bad").is_none());
        assert_eq!(store.get_parameters("Good"), Some(&rsi_set(10)));
    }

    #[test]
    fn with_custom_drops_invalid_presets() {
        let bad = Preset {
            name: "Bad".into(),
            description: String::new(),
            is_custom: true,
            parameters: rsi_set(0),
        };
        let good = Preset {
            name: "Good".into(),
            parameters: rsi_set(9),
            ..bad.clone()
        };
        let store = PresetStore::with_custom(vec![bad, good]);
        let names: Vec<&str> = store.custom().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Good"]);
    }

    #[test]
    fn import_skips_blank_names() {
        let mut store = PresetStore::new();
        let json = r#"[{"name":"","parameters":{}},{"name":"Keep","parameters":{"RSI":{"period":5}}}]"#;
        assert_eq!(store.import_json(json).unwrap(), 1);
        assert_eq!(store.get_parameters("Keep"), Some(&rsi_set(5)));
    }
}
