//! Keybinding configuration types and parsing.
//!
//! Every toolbar control of the whiteboard (undo, reset, copy, brush and
//! color selection, size sliders, draw-mode selector) can be driven from the
//! keyboard. Bindings are configurable in the `[keybindings]` table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Exit (asks for confirmation when there is unsaved history)
    Exit,

    // History
    Undo,
    Reset,

    // Export
    CopyImage,

    // Draw mode selector
    ToggleDrawMode,

    // Brush selection
    BrushStroke,
    BrushCircle,
    BrushRect,
    BrushArrow,
    BrushListNode,

    // Sliders
    IncreaseStrokeWidth,
    DecreaseStrokeWidth,
    IncreaseBrushSize,
    DecreaseBrushSize,

    // Color swatches
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorYellow,
    SetColorOrange,
    SetColorPink,
    SetColorWhite,
    SetColorBlack,
}

/// A single keybinding: a key with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+R" or "Escape".
    ///
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    /// A trailing "++" binds the '+' key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {s}"));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the empty parts are the '+' key
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// reset = ["Ctrl+Shift+R"]
/// copy_image = ["Ctrl+C"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_reset")]
    pub reset: Vec<String>,

    #[serde(default = "default_copy_image")]
    pub copy_image: Vec<String>,

    #[serde(default = "default_toggle_draw_mode")]
    pub toggle_draw_mode: Vec<String>,

    #[serde(default = "default_brush_stroke")]
    pub brush_stroke: Vec<String>,

    #[serde(default = "default_brush_circle")]
    pub brush_circle: Vec<String>,

    #[serde(default = "default_brush_rect")]
    pub brush_rect: Vec<String>,

    #[serde(default = "default_brush_arrow")]
    pub brush_arrow: Vec<String>,

    #[serde(default = "default_brush_list_node")]
    pub brush_list_node: Vec<String>,

    #[serde(default = "default_increase_stroke_width")]
    pub increase_stroke_width: Vec<String>,

    #[serde(default = "default_decrease_stroke_width")]
    pub decrease_stroke_width: Vec<String>,

    #[serde(default = "default_increase_brush_size")]
    pub increase_brush_size: Vec<String>,

    #[serde(default = "default_decrease_brush_size")]
    pub decrease_brush_size: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_orange")]
    pub set_color_orange: Vec<String>,

    #[serde(default = "default_set_color_pink")]
    pub set_color_pink: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            undo: default_undo(),
            reset: default_reset(),
            copy_image: default_copy_image(),
            toggle_draw_mode: default_toggle_draw_mode(),
            brush_stroke: default_brush_stroke(),
            brush_circle: default_brush_circle(),
            brush_rect: default_brush_rect(),
            brush_arrow: default_brush_arrow(),
            brush_list_node: default_brush_list_node(),
            increase_stroke_width: default_increase_stroke_width(),
            decrease_stroke_width: default_decrease_stroke_width(),
            increase_brush_size: default_increase_brush_size(),
            decrease_brush_size: default_decrease_brush_size(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_yellow: default_set_color_yellow(),
            set_color_orange: default_set_color_orange(),
            set_color_pink: default_set_color_pink(),
            set_color_white: default_set_color_white(),
            set_color_black: default_set_color_black(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    ///
    /// Returns an error if any keybinding string is invalid or if the same
    /// binding is assigned to two actions.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let groups: [(&[String], Action); 22] = [
            (self.exit.as_slice(), Action::Exit),
            (self.undo.as_slice(), Action::Undo),
            (self.reset.as_slice(), Action::Reset),
            (self.copy_image.as_slice(), Action::CopyImage),
            (self.toggle_draw_mode.as_slice(), Action::ToggleDrawMode),
            (self.brush_stroke.as_slice(), Action::BrushStroke),
            (self.brush_circle.as_slice(), Action::BrushCircle),
            (self.brush_rect.as_slice(), Action::BrushRect),
            (self.brush_arrow.as_slice(), Action::BrushArrow),
            (self.brush_list_node.as_slice(), Action::BrushListNode),
            (self.increase_stroke_width.as_slice(), Action::IncreaseStrokeWidth),
            (self.decrease_stroke_width.as_slice(), Action::DecreaseStrokeWidth),
            (self.increase_brush_size.as_slice(), Action::IncreaseBrushSize),
            (self.decrease_brush_size.as_slice(), Action::DecreaseBrushSize),
            (self.set_color_red.as_slice(), Action::SetColorRed),
            (self.set_color_green.as_slice(), Action::SetColorGreen),
            (self.set_color_blue.as_slice(), Action::SetColorBlue),
            (self.set_color_yellow.as_slice(), Action::SetColorYellow),
            (self.set_color_orange.as_slice(), Action::SetColorOrange),
            (self.set_color_pink.as_slice(), Action::SetColorPink),
            (self.set_color_white.as_slice(), Action::SetColorWhite),
            (self.set_color_black.as_slice(), Action::SetColorBlack),
        ];

        let mut map = HashMap::new();
        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{binding_str}' assigned to both {existing:?} and {action:?}"
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn bindings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| key.to_string()).collect()
}

fn default_exit() -> Vec<String> {
    bindings(&["Escape"])
}

fn default_undo() -> Vec<String> {
    bindings(&["Ctrl+Z"])
}

fn default_reset() -> Vec<String> {
    bindings(&["Ctrl+Shift+R"])
}

fn default_copy_image() -> Vec<String> {
    bindings(&["Ctrl+C"])
}

fn default_toggle_draw_mode() -> Vec<String> {
    bindings(&["Ctrl+M"])
}

fn default_brush_stroke() -> Vec<String> {
    bindings(&["Ctrl+1"])
}

fn default_brush_circle() -> Vec<String> {
    bindings(&["Ctrl+2"])
}

fn default_brush_rect() -> Vec<String> {
    bindings(&["Ctrl+3"])
}

fn default_brush_arrow() -> Vec<String> {
    bindings(&["Ctrl+4"])
}

fn default_brush_list_node() -> Vec<String> {
    bindings(&["Ctrl+5"])
}

fn default_increase_stroke_width() -> Vec<String> {
    bindings(&["+", "="])
}

fn default_decrease_stroke_width() -> Vec<String> {
    bindings(&["-", "_"])
}

fn default_increase_brush_size() -> Vec<String> {
    bindings(&["]"])
}

fn default_decrease_brush_size() -> Vec<String> {
    bindings(&["["])
}

fn default_set_color_red() -> Vec<String> {
    bindings(&["Alt+R"])
}

fn default_set_color_green() -> Vec<String> {
    bindings(&["Alt+G"])
}

fn default_set_color_blue() -> Vec<String> {
    bindings(&["Alt+B"])
}

fn default_set_color_yellow() -> Vec<String> {
    bindings(&["Alt+Y"])
}

fn default_set_color_orange() -> Vec<String> {
    bindings(&["Alt+O"])
}

fn default_set_color_pink() -> Vec<String> {
    bindings(&["Alt+P"])
}

fn default_set_color_white() -> Vec<String> {
    bindings(&["Alt+W"])
}

fn default_set_color_black() -> Vec<String> {
    bindings(&["Alt+K"])
}
