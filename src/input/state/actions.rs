use crate::config::Action;
use crate::draw::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
use crate::input::{brush::BrushKind, events::Key, mode::DrawMode};
use log::debug;

use super::InputState;

/// Stroke width change per keypress, in pixels.
const STROKE_WIDTH_STEP: f64 = 1.0;

/// Brush size change per keypress, in pixels.
const BRUSH_SIZE_STEP: f64 = 10.0;

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles:
    /// - Modifier key tracking
    /// - The draw key in keyboard mode (starts a session at the cursor)
    /// - Configurable keybindings for every toolbar control
    pub fn on_key_press(&mut self, key: Key) {
        // Handle modifier keys first
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        // A bare draw key is the pen button; with Ctrl/Alt it is a shortcut
        if self.is_draw_key(key) && !self.modifiers.command_held() {
            let (x, y) = self.cursor();
            self.begin_session(x, y);
            return;
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event.
    ///
    /// Releasing the draw key ends a keyboard-mode session.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ if self.is_draw_key(key) && self.trigger_held() => self.end_session(),
            _ => {}
        }
    }

    fn is_draw_key(&self, key: Key) -> bool {
        self.draw_mode() == DrawMode::Keyboard
            && matches!(key, Key::Char(c) if c.to_ascii_lowercase() == self.draw_key())
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Exit => {
                if self.is_drawing() {
                    // Finish the stroke rather than leaving mid-draw
                    self.end_session();
                    self.needs_redraw = true;
                } else if self.pending_confirmation().is_some() {
                    self.confirm_pending(false);
                } else {
                    self.request_exit();
                }
            }
            Action::Undo => {
                self.undo();
            }
            Action::Reset => self.request_reset(),
            Action::CopyImage => {
                self.set_pending_export(action);
                debug!("Copy image requested");
            }
            Action::ToggleDrawMode => {
                let mode = self.draw_mode().toggled();
                self.set_draw_mode(mode);
            }
            Action::BrushStroke => self.set_brush(BrushKind::Stroke),
            Action::BrushCircle => self.set_brush(BrushKind::Circle),
            Action::BrushRect => self.set_brush(BrushKind::Rect),
            Action::BrushArrow => self.set_brush(BrushKind::Arrow),
            Action::BrushListNode => self.set_brush(BrushKind::ListNode),
            Action::IncreaseStrokeWidth => {
                self.adjust_stroke_width(STROKE_WIDTH_STEP);
            }
            Action::DecreaseStrokeWidth => {
                self.adjust_stroke_width(-STROKE_WIDTH_STEP);
            }
            Action::IncreaseBrushSize => {
                self.adjust_brush_size(BRUSH_SIZE_STEP);
            }
            Action::DecreaseBrushSize => {
                self.adjust_brush_size(-BRUSH_SIZE_STEP);
            }
            Action::SetColorRed => self.set_color(RED),
            Action::SetColorGreen => self.set_color(GREEN),
            Action::SetColorBlue => self.set_color(BLUE),
            Action::SetColorYellow => self.set_color(YELLOW),
            Action::SetColorOrange => self.set_color(ORANGE),
            Action::SetColorPink => self.set_color(PINK),
            Action::SetColorWhite => self.set_color(WHITE),
            Action::SetColorBlack => self.set_color(BLACK),
        }
    }
}
