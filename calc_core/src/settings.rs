//! # Settings
//!
//! User preferences stored as TOML:
//!
//! ```toml
//! [presentation]
//! thousands_separator = true
//! default_decimals = 4
//!
//! [history]
//! capacity = 10
//!
//! [random]
//! seed = 42
//! ```
//!
//! Every key is optional. A missing file means defaults; a malformed one is
//! a [`CalcError::ConfigError`]. Saves are atomic: write a `.tmp` sibling,
//! sync, read it back, then rename over the target.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::history::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};
use crate::presenter::PresentationSettings;

/// Directory under the platform config dir.
pub const APP_DIR: &str = "calcdeck";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Entries kept by the general-purpose calculator, at most
    /// [`MAX_HISTORY_CAPACITY`]
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSettings {
    /// Fixed seed for reproducible draws; `None` uses the thread RNG
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub presentation: PresentationSettings,
    pub history: HistorySettings,
    pub random: RandomSettings,
}

impl Settings {
    /// `<config dir>/calcdeck/settings.toml`, when the platform has a
    /// config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn from_toml(contents: &str, origin: &Path) -> CalcResult<Self> {
        let settings: Settings = toml::from_str(contents)
            .map_err(|e| CalcError::config_error(origin.display().to_string(), e.to_string()))?;
        if settings.history.capacity > MAX_HISTORY_CAPACITY {
            return Err(CalcError::config_error(
                origin.display().to_string(),
                format!(
                    "history.capacity is {}, the maximum is {}",
                    settings.history.capacity, MAX_HISTORY_CAPACITY
                ),
            ));
        }
        Ok(settings)
    }

    /// Load from `path`. A file that does not exist yields defaults.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(CalcError::file_error("read", path.display().to_string(), e.to_string()));
            }
        };
        let settings = Settings::from_toml(&contents, path)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load from `path` if given, else from [`Settings::default_path`].
    pub fn load_or_default(path: Option<&Path>) -> CalcResult<Self> {
        match path {
            Some(p) => Settings::load(p),
            None => match Settings::default_path() {
                Some(p) => Settings::load(&p),
                None => Ok(Settings::default()),
            },
        }
    }

    pub fn to_toml(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    /// Atomically write the settings to `path`, creating parent dirs.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }

        let tmp_path = path.with_extension("toml.tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.write_all(contents.as_bytes()).map_err(|e| {
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.sync_all().map_err(|e| {
            CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        drop(tmp_file);

        // Verify the temp file parses before it replaces anything
        let written = fs::read_to_string(&tmp_path).map_err(|e| {
            CalcError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        if let Err(e) = Settings::from_toml(&written, &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })?;

        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_settings_path(name: &str) -> PathBuf {
        temp_dir().join(format!("calcdeck_test_{}_{}", name, std::process::id())).join(SETTINGS_FILE)
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_toml("[history]\ncapacity = 3\n", Path::new("inline")).unwrap();
        assert_eq!(settings.history.capacity, 3);
        assert!(settings.presentation.thousands_separator);
        assert_eq!(settings.random.seed, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::from_toml("", Path::new("inline")).unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = Settings::from_toml("[history]\ncapacity = \"many\"\n", Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_history_capacity_is_bounded() {
        let err = Settings::from_toml("[history]\ncapacity = 5000000000\n", Path::new("big.toml"))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("history.capacity"));

        let max = format!("[history]\ncapacity = {}\n", MAX_HISTORY_CAPACITY);
        assert_eq!(
            Settings::from_toml(&max, Path::new("max.toml")).unwrap().history.capacity,
            MAX_HISTORY_CAPACITY
        );
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = temp_settings_path("missing");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_settings_path("roundtrip");
        let mut settings = Settings::default();
        settings.presentation.default_decimals = Some(3);
        settings.random.seed = Some(99);

        settings.save(&path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(Settings::load(&path).unwrap(), settings);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
