//! Settings persistence

use std::path::{Path, PathBuf};

use tracing::debug;

use super::settings::GridSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::tracing::span_names;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves [`GridSettings`] as TOML in a config directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the user's config directory (`~/.config/dndgrid`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the platform has no config directory
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?;
        Ok(Self::with_config_dir(base.join("dndgrid")))
    }

    /// Creates a manager for a specific directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Directory holding the settings file
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, returning defaults if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load_settings(&self) -> ConfigResult<GridSettings> {
        let path = self.settings_path();
        let _span =
            crate::trace_operation!(span_names::CONFIG_LOAD, path = %path.display()).entered();
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(GridSettings::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings: GridSettings =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Writes settings, creating the config directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or cannot be written
    pub fn save_settings(&self, settings: &GridSettings) -> ConfigResult<()> {
        let path = self.settings_path();
        let _span =
            crate::trace_operation!(span_names::CONFIG_SAVE, path = %path.display()).entered();
        settings.validate()?;
        std::fs::create_dir_all(&self.config_dir)?;
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(&path, content)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
