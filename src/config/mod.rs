//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include the initial toolbar
//! state (color, stroke width, brush, draw mode), canvas size, confirmation prompts,
//! export destination and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ArrowConfig, CanvasConfig, DrawingConfig, ExportConfig, UiConfig};

use crate::input::mode::normalize_draw_key;
use crate::export::file::is_valid_filename_template;
use crate::input::state::{
    BRUSH_SIZE_RANGE, DEFAULT_BRUSH_SIZE, DEFAULT_STROKE_WIDTH, STROKE_WIDTH_RANGE, clamp_finite,
};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest canvas edge accepted from configuration.
const MAX_CANVAS_EDGE: i32 = 16384;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_stroke_width = 3.0
/// default_brush = "stroke"
/// draw_mode = "keyboard"
/// draw_key = "d"
///
/// [canvas]
/// width = 1920
/// height = 1080
///
/// [ui]
/// confirm_reset = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial toolbar state (color, stroke width, brush, draw mode)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead appearance for the arrow and list-node brushes
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Canvas size and export background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Confirmation prompts
    #[serde(default)]
    pub ui: UiConfig,

    /// Image export destination
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts for toolbar actions
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 1.0 - 50.0
    /// - `default_brush_size`: 20.0 - 200.0
    /// - `draw_key`: a - z
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `canvas.width` / `canvas.height`: 1 - 16384
    /// - `export.filename_template`: chrono specifiers only
    ///
    /// NaN and infinite sizes are replaced by their defaults.
    pub fn validate_and_clamp(&mut self) {
        let (min_width, max_width) = STROKE_WIDTH_RANGE;
        if !(min_width..=max_width).contains(&self.drawing.default_stroke_width) {
            warn!(
                "Invalid default_stroke_width {:.1}, clamping to {min_width:.1}-{max_width:.1} range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = clamp_finite(
                self.drawing.default_stroke_width,
                STROKE_WIDTH_RANGE,
                DEFAULT_STROKE_WIDTH,
            );
        }

        let (min_size, max_size) = BRUSH_SIZE_RANGE;
        if !(min_size..=max_size).contains(&self.drawing.default_brush_size) {
            warn!(
                "Invalid default_brush_size {:.1}, clamping to {min_size:.1}-{max_size:.1} range",
                self.drawing.default_brush_size
            );
            self.drawing.default_brush_size = clamp_finite(
                self.drawing.default_brush_size,
                BRUSH_SIZE_RANGE,
                DEFAULT_BRUSH_SIZE,
            );
        }

        match normalize_draw_key(self.drawing.draw_key) {
            Some(key) => self.drawing.draw_key = key,
            None => {
                warn!(
                    "Invalid draw_key '{}', falling back to 'q'",
                    self.drawing.draw_key
                );
                self.drawing.draw_key = 'q';
            }
        }

        if self.drawing.default_color.try_to_color().is_none() {
            warn!(
                "Unknown default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("black".to_string());
        }

        if !(5.0..=50.0).contains(&self.arrow.length) {
            warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-50.0 range",
                self.arrow.length
            );
            self.arrow.length = clamp_finite(self.arrow.length, (5.0, 50.0), 20.0);
        }

        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            warn!(
                "Invalid arrow angle {:.1}°, clamping to 15.0-60.0° range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees =
                clamp_finite(self.arrow.angle_degrees, (15.0, 60.0), 30.0);
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{MAX_CANVAS_EDGE}",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_EDGE);
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{MAX_CANVAS_EDGE}",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_EDGE);
        }

        if self.canvas.export_background.try_to_color().is_none() {
            warn!(
                "Unknown export_background {:?}, falling back to white",
                self.canvas.export_background
            );
            self.canvas.export_background = ColorSpec::Name("white".to_string());
        }

        if !is_valid_filename_template(&self.export.filename_template) {
            let fallback = ExportConfig::default().filename_template;
            warn!(
                "Invalid filename_template {:?}, falling back to {fallback:?}",
                self.export.filename_template
            );
            self.export.filename_template = fallback;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`
    /// (respecting `XDG_CONFIG_HOME`).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, falling back to defaults when the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Writes the documented example config to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// it cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BrushKind, DrawMode};
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.drawing.default_stroke_width, 3.0);
        assert_eq!(config.drawing.draw_mode, DrawMode::Pointer);
        assert_eq!(config.drawing.draw_key, 'q');
        assert!(config.ui.confirm_reset);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[drawing]\ndraw_mode = \"keyboard\"\ndraw_key = \"D\"\ndefault_brush = \"list-node\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.draw_mode, DrawMode::Keyboard);
        assert_eq!(config.drawing.draw_key, 'd');
        assert_eq!(config.drawing.default_brush, BrushKind::ListNode);
        assert_eq!(config.canvas.width, 1280);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.default_stroke_width = 500.0;
        config.drawing.default_brush_size = 5.0;
        config.drawing.draw_key = '7';
        config.arrow.angle_degrees = 90.0;
        config.canvas.width = 0;
        config.drawing.default_color = ColorSpec::Name("mauve-ish".into());

        config.validate_and_clamp();

        assert_eq!(config.drawing.default_stroke_width, 50.0);
        assert_eq!(config.drawing.default_brush_size, 20.0);
        assert_eq!(config.drawing.draw_key, 'q');
        assert_eq!(config.arrow.angle_degrees, 60.0);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(
            config.drawing.default_color,
            ColorSpec::Name("black".into())
        );
    }

    #[test]
    fn validate_replaces_non_finite_sizes_with_defaults() {
        let mut config = Config::default();
        config.drawing.default_stroke_width = f64::NAN;
        config.drawing.default_brush_size = f64::INFINITY;
        config.arrow.length = f64::NEG_INFINITY;
        config.arrow.angle_degrees = f64::NAN;

        config.validate_and_clamp();

        assert_eq!(config.drawing.default_stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(config.drawing.default_brush_size, DEFAULT_BRUSH_SIZE);
        assert_eq!(config.arrow.length, 20.0);
        assert_eq!(config.arrow.angle_degrees, 30.0);
    }

    #[test]
    fn validate_rejects_unknown_filename_specifier() {
        let mut config = Config::default();
        config.export.filename_template = "sketch_%Q".to_string();

        config.validate_and_clamp();

        assert_eq!(
            config.export.filename_template,
            ExportConfig::default().filename_template
        );

        config.export.filename_template = "board_%Y%m%d".to_string();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "board_%Y%m%d");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn serialized_config_round_trips() {
        let text = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.drawing.default_brush_size, 50.0);
    }
}
