//! Configuration file support for leercopy.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/leercopy/config.toml`. Settings cover the overlay tint, the
//! selection border, export destinations, printing, performance tuning and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::{ColorSpec, ImageFormat};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{BorderConfig, ExportConfig, OverlayConfig, PerformanceConfig, PrintConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [overlay]
/// opacity = 0.35
/// background_color = "gray"
///
/// [border]
/// enabled = true
/// color = "red"
///
/// [export]
/// save_directory = "~/Pictures/Leer"
/// format = "png"
///
/// [keybindings]
/// exit = ["Q", "Escape"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Overlay tint and tips panel
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Selection border
    #[serde(default)]
    pub border: BorderConfig,

    /// Clipboard, file and editor export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Print export settings
    #[serde(default)]
    pub print: PrintConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keybinding overrides
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `overlay.opacity`: 0.0 - 1.0
    /// - `overlay.tips_font_size`: 8.0 - 48.0
    /// - `print.page_width`, `print.page_height`: at least 1
    /// - `export.format`: png or bmp
    /// - `buffer_count`: 2 - 4
    pub fn validate_and_clamp(&mut self) {
        if !(0.0..=1.0).contains(&self.overlay.opacity) {
            log::warn!(
                "Invalid overlay opacity {:.2}, clamping to 0.0-1.0 range",
                self.overlay.opacity
            );
            self.overlay.opacity = if self.overlay.opacity.is_nan() {
                OverlayConfig::default().opacity
            } else {
                self.overlay.opacity.clamp(0.0, 1.0)
            };
        }

        if !(8.0..=48.0).contains(&self.overlay.tips_font_size) {
            log::warn!(
                "Invalid tips_font_size {:.1}, clamping to 8.0-48.0 range",
                self.overlay.tips_font_size
            );
            self.overlay.tips_font_size = self.overlay.tips_font_size.clamp(8.0, 48.0);
        }

        if self.print.page_width == 0 || self.print.page_height == 0 {
            log::warn!(
                "Invalid print page size {}x{}, using at least 1 pixel per side",
                self.print.page_width,
                self.print.page_height
            );
            self.print.page_width = self.print.page_width.max(1);
            self.print.page_height = self.print.page_height.max(1);
        }

        if ImageFormat::from_name(&self.export.format).is_none() {
            log::warn!(
                "Invalid export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, using the default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }

        if !(2..=4).contains(&self.performance.buffer_count) {
            log::warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/leercopy/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("leercopy");

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

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses a TOML document without validating it.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Copies the session's border and tips toggles back into the config.
    ///
    /// Returns true if either preference changed and the config needs saving.
    pub fn remember_toggles(&mut self, border_enabled: bool, show_tips: bool) -> bool {
        let changed =
            self.border.enabled != border_enabled || self.overlay.show_tips != show_tips;
        self.border.enabled = border_enabled;
        self.overlay.show_tips = show_tips;
        changed
    }

    /// Saves the current configuration to the user's config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the configuration to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes the documented example config to the user's config directory.
    ///
    /// Backs `leercopy --init-config`.
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
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }
}

const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_parses_to_defaults() {
        let config = Config::from_toml(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(config.overlay.opacity, defaults.overlay.opacity);
        assert_eq!(config.export.filename_template, defaults.export.filename_template);
        assert_eq!(config.keybindings.exit, defaults.keybindings.exit);
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn toggles_persist_through_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leercopy").join("config.toml");
        let mut config = Config::default();

        assert!(!config.remember_toggles(config.border.enabled, config.overlay.show_tips));
        assert!(config.remember_toggles(!config.border.enabled, !config.overlay.show_tips));
        config.save_to(&path).unwrap();

        let reloaded = Config::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
        let defaults = Config::default();
        assert_eq!(reloaded.border.enabled, !defaults.border.enabled);
        assert_eq!(reloaded.overlay.show_tips, !defaults.overlay.show_tips);
        assert_eq!(reloaded.export.save_directory, defaults.export.save_directory);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.overlay.opacity, 0.35);
        assert!(config.border.enabled);
        assert_eq!(config.print.page_width, 816);
        assert_eq!(config.export.image_format(), ImageFormat::Png);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::from_toml(
            r#"
            [overlay]
            opacity = 1.7

            [export]
            format = "gif"

            [print]
            page_width = 0

            [performance]
            buffer_count = 9
            "#,
        )
        .unwrap();

        config.validate_and_clamp();

        assert_eq!(config.overlay.opacity, 1.0);
        assert_eq!(config.export.format, "png");
        assert_eq!(config.print.page_width, 1);
        assert_eq!(config.performance.buffer_count, 4);
    }

    #[test]
    fn bmp_format_is_accepted() {
        let mut config = Config::from_toml("[export]\nformat = \"BMP\"\n").unwrap();
        config.validate_and_clamp();
        assert_eq!(config.export.image_format(), ImageFormat::Bmp);
    }

    #[test]
    fn rgb_colors_deserialize() {
        let config = Config::from_toml("[border]\ncolor = [0, 255, 0]\n").unwrap();
        assert_eq!(config.border.color, ColorSpec::Rgb([0, 255, 0]));
    }

    #[test]
    fn json_schema_names_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("overlay"));
        assert!(schema.contains("keybindings"));
    }
}
