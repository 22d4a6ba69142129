//! Persisted user settings.
//!
//! Settings live in a small JSON document, `settings.json`, inside the
//! platform configuration directory. The directory can be overridden with the
//! `FLIGHTPATH_CONFIG_DIR` environment variable. A missing file yields the
//! defaults; unknown fields are ignored so older binaries can read newer files.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::GraphBuildOptions;
use crate::output::OutputMode;
use crate::path::{SearchAlgorithm, SearchConfig, DEFAULT_BUFFER_NM};

/// Environment variable overriding the settings directory.
pub const CONFIG_DIR_ENV: &str = "FLIGHTPATH_CONFIG_DIR";

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Aircraft range in nautical miles; 0 means "not configured".
    pub range_nm: u32,
    pub output_mode: OutputMode,
    pub buffer_nm: u32,
    pub algorithm: SearchAlgorithm,
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            range_nm: 0,
            output_mode: OutputMode::Codes,
            buffer_nm: DEFAULT_BUFFER_NM,
            algorithm: SearchAlgorithm::HopAware,
            parallel: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file absent; using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn is_range_configured(&self) -> bool {
        self.range_nm > 0
    }

    pub fn build_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            threshold_nm: self.range_nm,
            parallel: self.parallel,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            algorithm: self.algorithm,
            buffer_nm: self.buffer_nm,
        }
    }
}

/// Directory holding `settings.json`.
///
/// Resolution order: explicit override, `FLIGHTPATH_CONFIG_DIR`, then the
/// platform configuration directory.
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let dirs =
        ProjectDirs::from("com", "flightpath", "flightpath").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Full path of the settings file.
pub fn settings_path(override_dir: Option<&Path>) -> Result<PathBuf> {
    Ok(config_dir(override_dir)?.join(SETTINGS_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("temp dir");
        let settings = Settings::load(&dir.path().join("settings.json")).expect("load");
        assert_eq!(settings, Settings::default());
        assert!(!settings.is_range_configured());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            range_nm: 412,
            output_mode: OutputMode::Names,
            ..Settings::default()
        };
        settings.save(&path).expect("save");

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded, settings);
        assert_eq!(loaded.build_options().threshold_nm, 412);
    }

    #[test]
    fn partial_documents_fill_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "range_nm": 250, "legacy": true }"#).expect("write");

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded.range_nm, 250);
        assert_eq!(loaded.buffer_nm, DEFAULT_BUFFER_NM);
        assert_eq!(loaded.search_config().algorithm, SearchAlgorithm::HopAware);
    }

    #[test]
    fn explicit_directory_wins() {
        let dir = tempdir().expect("temp dir");
        let path = settings_path(Some(dir.path())).expect("path");
        assert_eq!(path, dir.path().join("settings.json"));
    }
}
