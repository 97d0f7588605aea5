//! Configuration file support for shotstage.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/shotstage/config.toml`. Settings
//! include screenshot sources, picker display preferences, keybindings, and
//! the optional SSH sync section.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{SourcesConfig, SyncConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [sources]
/// paths = ["~/Desktop/ss", "/out/**/thumbnail_*.png"]
///
/// [ui]
/// visible_rows = 10
/// thumbnail_max_bytes = 10485760
///
/// [sync]
/// watch_dir = "~/Desktop"
/// remote_dir = "~/Desktop/ss"
/// remote_host = "dev@mac.local"
///
/// [keybindings]
/// toggle_stage = ["Space", "S"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Screenshot sources (directories or glob patterns)
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Picker display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Optional SSH sync-script settings
    #[serde(default)]
    pub sync: Option<SyncConfig>,

    /// Picker keybindings
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `ui.visible_rows`: 3 - 30
    /// - `ui.tab_label_width`: 8 - 40
    /// - `ui.thumbnail_max_bytes`: 64 KiB - 64 MiB
    /// - `ui.thumbnail_width`: 16 - 80
    /// - `sync.port`: 1 - 65535
    fn validate_and_clamp(&mut self) {
        if !(3..=30).contains(&self.ui.visible_rows) {
            log::warn!(
                "Invalid visible_rows {}, clamping to 3-30 range",
                self.ui.visible_rows
            );
            self.ui.visible_rows = self.ui.visible_rows.clamp(3, 30);
        }

        if !(8..=40).contains(&self.ui.tab_label_width) {
            log::warn!(
                "Invalid tab_label_width {}, clamping to 8-40 range",
                self.ui.tab_label_width
            );
            self.ui.tab_label_width = self.ui.tab_label_width.clamp(8, 40);
        }

        const MIN_THUMB: u64 = 64 * 1024;
        const MAX_THUMB: u64 = 64 * 1024 * 1024;
        if !(MIN_THUMB..=MAX_THUMB).contains(&self.ui.thumbnail_max_bytes) {
            log::warn!(
                "Invalid thumbnail_max_bytes {}, clamping to {}-{} range",
                self.ui.thumbnail_max_bytes,
                MIN_THUMB,
                MAX_THUMB
            );
            self.ui.thumbnail_max_bytes = self.ui.thumbnail_max_bytes.clamp(MIN_THUMB, MAX_THUMB);
        }

        if !(16..=80).contains(&self.ui.thumbnail_width) {
            log::warn!(
                "Invalid thumbnail_width {}, clamping to 16-80 range",
                self.ui.thumbnail_width
            );
            self.ui.thumbnail_width = self.ui.thumbnail_width.clamp(16, 80);
        }

        if let Some(sync) = &mut self.sync
            && sync.port == 0
        {
            log::warn!("Invalid sync port 0, falling back to 22");
            sync.port = 22;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/shotstage/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("shotstage");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's
    /// config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation_unchanged() {
        let mut config = Config::default();
        config.validate_and_clamp();
        assert_eq!(config.ui.visible_rows, 10);
        assert_eq!(config.ui.tab_label_width, 18);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.ui.visible_rows = 500;
        config.ui.tab_label_width = 2;
        config.ui.thumbnail_max_bytes = 1;
        config.sync = Some(SyncConfig {
            port: 0,
            ..SyncConfig::default()
        });

        config.validate_and_clamp();
        assert_eq!(config.ui.visible_rows, 30);
        assert_eq!(config.ui.tab_label_width, 8);
        assert_eq!(config.ui.thumbnail_max_bytes, 64 * 1024);
        assert_eq!(config.sync.unwrap().port, 22);
    }

    #[test]
    fn parses_example_config() {
        let example = include_str!("../../config.example.toml");
        let config: Config = toml::from_str(example).unwrap();
        assert!(config.sync.is_some());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[sources]\npaths = [\"~/shots\"]\n").unwrap();
        assert_eq!(config.sources.paths, vec!["~/shots"]);
        assert_eq!(config.ui.visible_rows, 10);
        assert!(config.sync.is_none());
    }
}
