use crate::input::{events::MouseButton, mode::DrawMode};

use super::InputState;

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Mouse X coordinate
    /// * `y` - Mouse Y coordinate
    ///
    /// # Behavior
    /// - Left click in pointer mode: starts a session (stamps click brushes)
    /// - Anything else only updates the cursor position
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        if button == MouseButton::Left && self.draw_mode() == DrawMode::Pointer {
            self.begin_session(x, y);
        } else {
            self.continue_session(x, y);
        }
    }

    /// Processes mouse motion events.
    ///
    /// Motion is tracked in both modes: in keyboard mode the stroke follows
    /// the cursor while the draw key is held.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        self.continue_session(x, y);
    }

    /// Processes mouse button release events.
    ///
    /// Releasing the left button in pointer mode ends the session at the
    /// release position.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: i32, y: i32) {
        self.continue_session(x, y);
        if button == MouseButton::Left
            && self.draw_mode() == DrawMode::Pointer
            && self.trigger_held()
        {
            self.end_session();
        }
    }

    /// Processes the pointer leaving the canvas.
    ///
    /// Ends a pointer-mode session, as if the button had been released.
    pub fn on_mouse_leave(&mut self) {
        if self.draw_mode() == DrawMode::Pointer && self.trigger_held() {
            self.end_session();
        }
    }
}
