//! Driver settings persisted as TOML
//!
//! Stored in ~/.config/blockfall/settings.toml (or platform equivalent).
//! Game rules are fixed; only how the driver runs and reports is configurable.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Driver settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    pub soak: SoakSettings,
    pub output: OutputSettings,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive applied on top of `RUST_LOG`
    pub filter: String,
}

/// Random soak run defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoakSettings {
    /// Actions to generate
    pub steps: u64,
    /// Seed for the action stream
    pub seed: u64,
}

/// What to print when a run finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print the final board as text
    pub print_board: bool,
    /// Print the final snapshot as JSON
    pub print_json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "blockfall=debug".to_string(),
        }
    }
}

impl Default for SoakSettings {
    fn default() -> Self {
        Self {
            steps: 10_000,
            seed: 2024,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            print_board: true,
            print_json: false,
        }
    }
}

impl Settings {
    /// Location of `settings.toml` in the platform config directory
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Parse settings, filling anything missing with defaults
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
        }
    }

    /// Load from the config directory, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("{}, using defaults", e);
            Self::default()
        })
    }

    /// Write settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;
        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))
    }

    /// Write this configuration to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn write_if_missing(&self, path: &Path) -> Result<bool, String> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        tracing::debug!(path = %path.display(), "wrote default settings");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml("[soak]\nsteps = 50\n").unwrap();
        assert_eq!(settings.soak.steps, 50);
        assert_eq!(settings.soak.seed, SoakSettings::default().seed);
        assert_eq!(settings.log, LogSettings::default());
        assert!(settings.output.print_board);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.output.print_json = true;
        settings.log.filter = "blockfall=trace".to_string();
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("blockfall-settings-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("nested").join("settings.toml")
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = scratch_path("missing");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let path = scratch_path("save");
        let mut settings = Settings::default();
        settings.soak.seed = 7;
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_write_if_missing_keeps_existing_file() {
        let path = scratch_path("existing");
        let mut custom = Settings::default();
        custom.output.print_json = true;
        assert!(custom.write_if_missing(&path).unwrap());
        assert!(!Settings::default().write_if_missing(&path).unwrap());
        assert_eq!(Settings::load_from(&path).unwrap(), custom);
    }

    #[test]
    fn test_corrupt_file_on_disk_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[output\nprint_board = ").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let err = Settings::from_toml("[soak]\nsteps = \"many\"\n").unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));
    }
}
