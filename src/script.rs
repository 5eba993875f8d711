//! Scripted input replay.
//!
//! A script is a TOML document describing a drawing session as the raw
//! pointer and keyboard events a front end would deliver, plus the toolbar
//! changes a user would make between them:
//!
//! ```toml
//! [canvas]
//! width = 400
//! height = 300
//!
//! [[events]]
//! type = "set_brush"
//! brush = "circle"
//!
//! [[events]]
//! type = "pointer_down"
//! x = 120
//! y = 80
//!
//! [[events]]
//! type = "pointer_up"
//! x = 120
//! y = 80
//! ```
//!
//! Events are fed to [`InputState`] in order, exactly as live input would be.

use crate::config::{Action, ColorSpec, Config};
use crate::input::{BrushKind, DrawMode, InputState, Key, MouseButton};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Canvas overrides declared by a script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScriptCanvas {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// One recorded input event or toolbar change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: i32,
        y: i32,
        #[serde(default)]
        button: MouseButton,
    },
    PointerMove {
        x: i32,
        y: i32,
    },
    PointerUp {
        x: i32,
        y: i32,
        #[serde(default)]
        button: MouseButton,
    },
    PointerLeave,
    /// Key names follow keybinding syntax: "q", "Escape", "Ctrl", "Shift"...
    KeyDown {
        key: String,
    },
    KeyUp {
        key: String,
    },
    SetMode {
        mode: DrawMode,
    },
    SetBrush {
        brush: BrushKind,
    },
    SetBrushSize {
        size: f64,
    },
    SetStrokeWidth {
        width: f64,
    },
    SetColor {
        color: ColorSpec,
    },
    SetDrawKey {
        key: char,
    },
    Undo,
    /// Reset request, subject to `ui.confirm_reset`
    Reset,
    /// Answers the pending confirmation prompt
    Confirm {
        #[serde(default = "default_accept")]
        accept: bool,
    },
    CopyImage,
}

fn default_accept() -> bool {
    true
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub canvas: ScriptCanvas,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// How a replay treats confirmation prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Accept every confirmation prompt as soon as it appears
    pub auto_confirm: bool,
}

/// What happened during a replay.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    /// Number of events fed to the session
    pub events_applied: usize,
    /// Canvas images captured at each copy-image request, in order
    pub copy_requests: Vec<Vec<u8>>,
    /// Whether the session asked to exit (remaining events were skipped)
    pub exit_requested: bool,
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(text)?)
    }
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script: Script = text.parse()?;
        debug!(
            "Loaded script {} with {} events",
            path.display(),
            script.events.len()
        );
        Ok(script)
    }

    /// Applies the script's canvas overrides to `config`.
    pub fn apply_canvas_overrides(&self, config: &mut Config) {
        if let Some(width) = self.canvas.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.canvas.height {
            config.canvas.height = height;
        }
    }

    /// Feeds every event to `state` in order.
    ///
    /// Stops early once the session requests exit. Copy-image requests are
    /// fulfilled by encoding the canvas at that moment. A stroke still held
    /// when the script runs out is finalized into history.
    pub fn apply(&self, state: &mut InputState, options: ReplayOptions) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for event in &self.events {
            apply_event(state, event);
            summary.events_applied += 1;

            if options.auto_confirm && state.pending_confirmation().is_some() {
                state.confirm_pending(true);
            }

            if state.take_pending_export().is_some() {
                match state.export_png() {
                    Ok(png) => summary.copy_requests.push(png),
                    Err(err) => warn!("Failed to encode canvas for copy: {err}"),
                }
            }

            if state.should_exit {
                summary.exit_requested = true;
                break;
            }
        }

        state.finish();

        info!(
            "Replayed {}/{} events, {} history entries ({} bytes)",
            summary.events_applied,
            self.events.len(),
            state.history().len(),
            state.history().total_bytes()
        );
        summary
    }
}

fn apply_event(state: &mut InputState, event: &ScriptEvent) {
    match event {
        ScriptEvent::PointerDown { x, y, button } => state.on_mouse_press(*button, *x, *y),
        ScriptEvent::PointerMove { x, y } => state.on_mouse_motion(*x, *y),
        ScriptEvent::PointerUp { x, y, button } => state.on_mouse_release(*button, *x, *y),
        ScriptEvent::PointerLeave => state.on_mouse_leave(),
        ScriptEvent::KeyDown { key } => state.on_key_press(parse_key(key)),
        ScriptEvent::KeyUp { key } => state.on_key_release(parse_key(key)),
        ScriptEvent::SetMode { mode } => state.set_draw_mode(*mode),
        ScriptEvent::SetBrush { brush } => state.set_brush(*brush),
        ScriptEvent::SetBrushSize { size } => {
            state.set_brush_size(*size);
        }
        ScriptEvent::SetStrokeWidth { width } => {
            state.set_stroke_width(*width);
        }
        ScriptEvent::SetColor { color } => match color.try_to_color() {
            Some(color) => state.set_color(color),
            None => warn!("Ignoring unknown color {color:?}"),
        },
        ScriptEvent::SetDrawKey { key } => {
            state.set_draw_key(*key);
        }
        ScriptEvent::Undo => {
            state.undo();
        }
        ScriptEvent::Reset => state.request_reset(),
        ScriptEvent::Confirm { accept } => {
            if state.confirm_pending(*accept).is_none() {
                debug!("Confirm event with nothing pending");
            }
        }
        ScriptEvent::CopyImage => state.handle_action(Action::CopyImage),
    }
}

fn parse_key(name: &str) -> Key {
    let key = Key::from_name(name);
    if key == Key::Unknown {
        warn!("Unknown key name {name:?} in script");
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::state::PendingConfirmation;
    use tempfile::TempDir;

    fn small_state() -> InputState {
        let mut config = Config::default();
        config.canvas.width = 200;
        config.canvas.height = 200;
        InputState::from_config(&config).unwrap()
    }

    const STROKE: &str = r#"
[[events]]
type = "pointer_down"
x = 10
y = 20

[[events]]
type = "pointer_move"
x = 150
y = 20

[[events]]
type = "pointer_up"
x = 150
y = 20
"#;

    #[test]
    fn parses_every_event_kind() {
        let script: Script = r##"
[canvas]
width = 640

[[events]]
type = "pointer_down"
x = 1
y = 2
button = "right"

[[events]]
type = "pointer_move"
x = 3
y = 4

[[events]]
type = "pointer_up"
x = 3
y = 4

[[events]]
type = "pointer_leave"

[[events]]
type = "key_down"
key = "Ctrl"

[[events]]
type = "key_up"
key = "z"

[[events]]
type = "set_mode"
mode = "keyboard"

[[events]]
type = "set_brush"
brush = "list-node"

[[events]]
type = "set_brush_size"
size = 80.0

[[events]]
type = "set_stroke_width"
width = 5.0

[[events]]
type = "set_color"
color = "#ff8000"

[[events]]
type = "set_draw_key"
key = "d"

[[events]]
type = "undo"

[[events]]
type = "reset"

[[events]]
type = "confirm"

[[events]]
type = "copy_image"
"##
        .parse()
        .unwrap();

        assert_eq!(script.canvas.width, Some(640));
        assert_eq!(script.canvas.height, None);
        assert_eq!(script.events.len(), 16);
        assert_eq!(
            script.events[0],
            ScriptEvent::PointerDown {
                x: 1,
                y: 2,
                button: MouseButton::Right
            }
        );
        assert_eq!(
            script.events[2],
            ScriptEvent::PointerUp {
                x: 3,
                y: 4,
                button: MouseButton::Left
            }
        );
        assert_eq!(
            script.events[7],
            ScriptEvent::SetBrush {
                brush: BrushKind::ListNode
            }
        );
        assert_eq!(script.events[11], ScriptEvent::SetDrawKey { key: 'd' });
        assert_eq!(script.events[14], ScriptEvent::Confirm { accept: true });
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let result: Result<Script, _> = "[[events]]\ntype = \"teleport\"\n".parse();
        assert!(matches!(result, Err(ScriptError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let err = Script::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn replays_stroke_into_history() {
        let script: Script = STROKE.parse().unwrap();
        let mut state = small_state();

        let summary = script.apply(&mut state, ReplayOptions::default());

        assert_eq!(summary.events_applied, 3);
        assert!(!summary.exit_requested);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn keyboard_mode_script_draws_with_draw_key() {
        let script: Script = r#"
[[events]]
type = "set_mode"
mode = "keyboard"

[[events]]
type = "set_draw_key"
key = "d"

[[events]]
type = "pointer_move"
x = 10
y = 20

[[events]]
type = "key_down"
key = "d"

[[events]]
type = "pointer_move"
x = 150
y = 20

[[events]]
type = "key_up"
key = "d"
"#
        .parse()
        .unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions::default());

        assert_eq!(state.draw_key(), 'd');
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn reset_waits_for_confirm_event() {
        let text = format!("{STROKE}\n[[events]]\ntype = \"reset\"\n");
        let script: Script = text.parse().unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions::default());
        assert_eq!(state.history().len(), 1);
        assert_eq!(
            state.pending_confirmation(),
            Some(PendingConfirmation::Reset)
        );

        let confirm: Script = "[[events]]\ntype = \"confirm\"\n".parse().unwrap();
        confirm.apply(&mut state, ReplayOptions::default());
        assert!(state.history().is_empty());
    }

    #[test]
    fn auto_confirm_accepts_reset() {
        let text = format!("{STROKE}\n[[events]]\ntype = \"reset\"\n");
        let script: Script = text.parse().unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions { auto_confirm: true });

        assert!(state.history().is_empty());
        assert_eq!(state.pending_confirmation(), None);
    }

    #[test]
    fn copy_image_captures_canvas_at_request_time() {
        let text = format!("{STROKE}\n[[events]]\ntype = \"copy_image\"\n");
        let script: Script = text.parse().unwrap();
        let mut state = small_state();

        let summary = script.apply(&mut state, ReplayOptions::default());

        assert_eq!(summary.copy_requests.len(), 1);
        assert!(summary.copy_requests[0].starts_with(b"\x89PNG"));
        assert_eq!(state.take_pending_export(), None);
    }

    #[test]
    fn exit_stops_replay() {
        let text = format!("[[events]]\ntype = \"key_down\"\nkey = \"Escape\"\n{STROKE}");
        let script: Script = text.parse().unwrap();
        let mut state = small_state();

        let summary = script.apply(&mut state, ReplayOptions::default());

        assert!(summary.exit_requested);
        assert_eq!(summary.events_applied, 1);
        assert!(state.history().is_empty());
    }

    #[test]
    fn stroke_held_at_end_of_script_is_recorded() {
        let script: Script = r#"
[[events]]
type = "pointer_down"
x = 10
y = 20

[[events]]
type = "pointer_move"
x = 150
y = 20
"#
        .parse()
        .unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions::default());

        assert!(!state.is_drawing());
        assert_eq!(state.history().len(), 1);
        assert!(state.has_unsaved_history());
    }

    #[test]
    fn draw_key_held_at_end_of_script_is_recorded() {
        let script: Script = r#"
[[events]]
type = "set_mode"
mode = "keyboard"

[[events]]
type = "pointer_move"
x = 10
y = 20

[[events]]
type = "key_down"
key = "q"

[[events]]
type = "pointer_move"
x = 150
y = 20
"#
        .parse()
        .unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions::default());

        assert_eq!(state.history().len(), 1);

        // The key is no longer considered held, so a new press starts a stroke
        state.on_key_press(Key::Char('q'));
        assert!(state.is_drawing());
    }

    #[test]
    fn nan_stroke_width_falls_back_to_default() {
        let script: Script = format!(
            "[[events]]\ntype = \"set_stroke_width\"\nwidth = nan\n{STROKE}"
        )
        .parse()
        .unwrap();
        let mut state = small_state();

        script.apply(&mut state, ReplayOptions::default());

        assert_eq!(state.stroke_width(), crate::input::state::DEFAULT_STROKE_WIDTH);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn canvas_overrides_update_config() {
        let script: Script = "[canvas]\nheight = 90\n".parse().unwrap();
        let mut config = Config::default();

        script.apply_canvas_overrides(&mut config);

        assert_eq!(config.canvas.width, 1280);
        assert_eq!(config.canvas.height, 90);
    }
}
