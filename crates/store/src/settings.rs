//! Editor settings management
//!
//! Snap and clamp preferences for the canvas editor, persisted as JSON.

use crate::Result;
use layout_engine::{GridSettings, SnapOptions, DEFAULT_SNAP_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SETTINGS_FILE: &str = "editor-settings.json";

/// Canvas editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Snap distance in pixels
    pub snap_threshold: f64,
    pub grid_enabled: bool,
    /// Grid spacing in pixels
    pub grid_size: f64,
    /// Keep dragged elements inside their zone
    pub clamp_to_zone: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            grid_enabled: false,
            grid_size: 10.0,
            clamp_to_zone: true,
        }
    }
}

impl EditorSettings {
    /// Snap options for the layout engine. A negative threshold falls back to
    /// the default; a non-positive grid size disables the grid.
    pub fn snap_options(&self) -> SnapOptions {
        let threshold = if self.snap_threshold >= 0.0 {
            self.snap_threshold
        } else {
            DEFAULT_SNAP_THRESHOLD
        };
        let grid = (self.grid_enabled && self.grid_size > 0.0).then_some(GridSettings {
            enabled: true,
            size: self.grid_size,
        });
        SnapOptions { threshold, grid }
    }
}

/// Settings manager for loading, saving, and updating editor settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: EditorSettings,
}

impl SettingsManager {
    /// Create a settings manager storing its file in `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join(SETTINGS_FILE),
            current: EditorSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    /// or can't be parsed
    pub fn load(&mut self) -> Result<&EditorSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<EditorSettings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse editor settings, using defaults: {}", e);
                    EditorSettings::default()
                }
            }
        } else {
            EditorSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &EditorSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update(&mut self, settings: EditorSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.snap_threshold, 8.0);
        assert!(!settings.grid_enabled);
        assert_eq!(settings.grid_size, 10.0);
        assert!(settings.clamp_to_zone);
        assert_eq!(settings.snap_options(), SnapOptions::default());
    }

    #[test]
    fn test_snap_options_conversion() {
        let settings = EditorSettings {
            snap_threshold: 5.0,
            grid_enabled: true,
            grid_size: 20.0,
            ..Default::default()
        };
        let options = settings.snap_options();
        assert_eq!(options.threshold, 5.0);
        assert_eq!(options.grid, Some(GridSettings { enabled: true, size: 20.0 }));

        let broken = EditorSettings {
            snap_threshold: -1.0,
            grid_enabled: true,
            grid_size: 0.0,
            ..Default::default()
        };
        let options = broken.snap_options();
        assert_eq!(options.threshold, DEFAULT_SNAP_THRESHOLD);
        assert_eq!(options.grid, None);
    }

    #[test]
    fn test_partial_settings_file() {
        let parsed: EditorSettings = serde_json::from_str(r#"{"gridEnabled": true}"#).unwrap();
        assert!(parsed.grid_enabled);
        assert_eq!(parsed.snap_threshold, 8.0);
    }

    #[test]
    fn test_settings_manager_load_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());

        // Load should return defaults when no file exists
        let settings = manager.load().unwrap();
        assert_eq!(settings, &EditorSettings::default());

        let new_settings = EditorSettings {
            snap_threshold: 4.0,
            clamp_to_zone: false,
            ..Default::default()
        };
        manager.update(new_settings.clone()).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path().to_path_buf());
        assert_eq!(manager2.load().unwrap(), &new_settings);

        let reset = manager2.reset().unwrap();
        assert_eq!(reset, &EditorSettings::default());
    }

    #[test]
    fn test_unparseable_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path().to_path_buf());
        std::fs::write(manager.settings_path(), "{ not json").unwrap();

        assert_eq!(manager.load().unwrap(), &EditorSettings::default());
    }
}
