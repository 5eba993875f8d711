//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::state::{DEFAULT_BRUSH_SIZE, DEFAULT_STROKE_WIDTH};
use crate::input::{BrushKind, DrawMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Initial values of the toolbar controls when a session starts. All of them
/// can be changed at runtime through keybindings or script events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default stroke color - a swatch name, a `#rrggbb` string or an RGB array
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f64,

    /// Default brush type (stroke, circle, rect, arrow, list-node)
    #[serde(default)]
    pub default_brush: BrushKind,

    /// Default size of click brushes in pixels (valid range: 20.0 - 200.0)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: f64,

    /// Draw trigger: "pointer" (mouse button) or "keyboard" (draw key)
    #[serde(default)]
    pub draw_mode: DrawMode,

    /// Letter key (a-z) that acts as the pen button in keyboard mode
    #[serde(default = "default_draw_key")]
    pub draw_key: char,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_stroke_width: default_stroke_width(),
            default_brush: BrushKind::default(),
            default_brush_size: default_brush_size(),
            draw_mode: DrawMode::default(),
            draw_key: default_draw_key(),
        }
    }
}

/// Arrow drawing settings, shared by the arrow and list-node brushes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Canvas surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: i32,

    /// Background the transparent canvas is flattened onto when exporting
    #[serde(default = "default_export_background")]
    pub export_background: ColorSpec,

    /// Export the raw canvas with its transparency instead of flattening it
    #[serde(default)]
    pub transparent_export: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            export_background: default_export_background(),
            transparent_export: false,
        }
    }
}

/// Confirmation prompts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Ask before Reset wipes the canvas and history
    #[serde(default = "default_true")]
    pub confirm_reset: bool,

    /// Ask before exiting while undo history (unsaved work) exists
    #[serde(default = "default_true")]
    pub confirm_exit_with_history: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            confirm_reset: true,
            confirm_exit_with_history: true,
        }
    }
}

/// Image export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for saved images (supports a leading `~/`)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template (chrono format specifiers, extension added automatically)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

fn default_brush_size() -> f64 {
    DEFAULT_BRUSH_SIZE
}

fn default_draw_key() -> char {
    'q'
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_canvas_width() -> i32 {
    1280
}

fn default_canvas_height() -> i32 {
    720
}

fn default_export_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_true() -> bool {
    true
}

fn default_save_directory() -> String {
    "~/Pictures/Sketchboard".to_string()
}

fn default_filename_template() -> String {
    "sketchboard_%Y-%m-%d_%H%M%S".to_string()
}
