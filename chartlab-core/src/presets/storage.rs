//! File persistence for custom presets.
//!
//! Customs live as a JSON array in `<dir>/indicator-presets.json`. Only
//! custom presets are written; built-ins come from code.

use std::path::{Path, PathBuf};

use super::{Preset, PresetError, PresetStore};

/// Well-known storage key for the custom preset array.
pub const CUSTOM_PRESETS_KEY: &str = "indicator-presets";

/// Location of the custom preset file inside `dir`.
pub fn preset_file(dir: &Path) -> PathBuf {
    dir.join(format!("{CUSTOM_PRESETS_KEY}.json"))
}

/// Load custom presets from `dir`. A missing file means no customs yet.
pub fn load_custom(dir: &Path) -> Result<Vec<Preset>, PresetError> {
    let path = preset_file(dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no custom preset file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content).map_err(PresetError::Parse)
}

/// Write custom presets to `dir`. Creates the directory if needed.
pub fn save_custom(dir: &Path, presets: &[Preset]) -> Result<(), PresetError> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(presets).map_err(PresetError::Serialize)?;
    std::fs::write(preset_file(dir), json)?;
    Ok(())
}

impl PresetStore {
    /// Built-ins plus the customs persisted in `dir`.
    pub fn open(dir: &Path) -> Result<Self, PresetError> {
        Ok(Self::with_custom(load_custom(dir)?))
    }

    /// Persist the current customs to `dir`.
    pub fn persist(&self, dir: &Path) -> Result<(), PresetError> {
        save_custom(dir, self.custom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSet;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_custom(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn persist_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut store = PresetStore::new();
        store.save("Mine", ParameterSet::defaults(), "all defaults");
        store.persist(&nested).unwrap();
        assert!(preset_file(&nested).exists());

        let reopened = PresetStore::open(&nested).unwrap();
        assert_eq!(reopened.custom(), store.custom());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(preset_file(dir.path()), "not valid json {{{").unwrap();
        assert!(matches!(
            load_custom(dir.path()),
            Err(PresetError::Parse(_))
        ));
    }

    #[test]
    fn open_skips_out_of_range_presets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            preset_file(dir.path()),
            r#"[{"name":"Bad","isCustom":true,"parameters":{"ADX":{"period":1}}},
                {"name":"Fine","isCustom":true,"parameters":{"ADX":{"period":20}}}]"#,
        )
        .unwrap();

        // The raw file still holds both entries.
        assert_eq!(load_custom(dir.path()).unwrap().len(), 2);

        let store = PresetStore::open(dir.path()).unwrap();
        assert!(store.get("Bad").is_none());
        assert!(store.get("Fine").is_some());
    }

    #[test]
    fn file_name_uses_storage_key() {
        let path = preset_file(Path::new("/tmp/x"));
        assert_eq!(path, Path::new("/tmp/x/indicator-presets.json"));
    }
}
