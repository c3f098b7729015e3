//! Persisted settings
//!
//! Stored as YAML in the user's config directory.
//! Default location: ~/.config/mu-player/settings.yaml
//!
//! Keys:
//! - `location`: folder shown in the browser (default: home)
//! - `volume`: 0..=100 (default: 100)
//! - `geometry`: window size/position, absent until the first exit

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to create settings directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Window size and position. Only the GUI looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub location: PathBuf,
    pub volume: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<WindowGeometry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location: super::library::home_dir(),
            volume: MAX_VOLUME,
            geometry: None,
        }
    }
}

/// Where settings live on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ~/.config/mu-player/settings.yaml (or the platform equivalent)
    pub fn default_location() -> Self {
        let base = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        Self::new(base.join("mu-player").join("settings.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings. Never fails: missing or broken files give defaults.
    pub fn load(&self) -> Settings {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no settings file, using defaults");
                return Settings::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };

        match serde_yaml::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.volume = settings.volume.min(MAX_VOLUME);
                tracing::debug!(?settings, "settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse settings, using defaults");
                Settings::default()
            }
        }
    }

    /// Write settings, creating the parent directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yaml::to_string(settings)?;
        std::fs::write(&self.path, yaml).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let store = SettingsStore::new(tmp.path().join("settings.yaml"));

        let settings = store.load();
        assert_eq!(settings.volume, 100);
        assert!(settings.geometry.is_none());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let tmp = TempDir::new().unwrap();
        let store = SettingsStore::new(tmp.path().join("nested").join("settings.yaml"));

        let settings = Settings {
            location: tmp.path().to_path_buf(),
            volume: 42,
            geometry: Some(WindowGeometry {
                width: 800.0,
                height: 600.0,
                x: Some(10.0),
                y: None,
            }),
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load(), settings);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.yaml");
        std::fs::write(&path, "volume: 30\n").unwrap();

        let settings = SettingsStore::new(&path).load();
        assert_eq!(settings.volume, 30);
        assert_eq!(settings.location, Settings::default().location);
        assert!(settings.geometry.is_none());
    }

    #[test]
    fn out_of_range_volume_is_clamped_on_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.yaml");
        std::fs::write(&path, "volume: 250\n").unwrap();

        assert_eq!(SettingsStore::new(&path).load().volume, 100);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.yaml");
        std::fs::write(&path, "volume: [not, a, number").unwrap();

        assert_eq!(SettingsStore::new(&path).load(), Settings::default());
    }
}
