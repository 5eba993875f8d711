//! Drawing session state machine and input state management.

use super::{
    BRUSH_SIZE_RANGE, DEFAULT_BRUSH_SIZE, DEFAULT_STROKE_WIDTH, STROKE_WIDTH_RANGE, clamp_finite,
};
use crate::config::{Action, Config, KeyBinding, UiConfig};
use crate::draw::{Canvas, CanvasError, Color, Stamp};
use crate::history::History;
use crate::input::{
    brush::BrushKind,
    mode::{DrawMode, normalize_draw_key},
    modifiers::Modifiers,
};
use crate::util;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a drawing session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("Invalid keybindings: {0}")]
    Keybindings(String),
}

/// Current drawing session state machine.
///
/// Click brushes never leave `Idle`: their shape is stamped and recorded the
/// moment the session starts. Only the freehand stroke brush enters `Drawing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for the draw trigger
    Idle,
    /// Freehand stroke in progress (mouse button or draw key held)
    Drawing {
        /// X coordinate of the last stroked point
        last_x: i32,
        /// Y coordinate of the last stroked point
        last_y: i32,
        /// Total length of the segments drawn so far
        distance: f64,
    },
}

/// A destructive request waiting for the user to confirm or cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmation {
    /// Wipe the canvas and the undo history
    Reset,
    /// Leave while undo history (unsaved work) exists
    Exit,
}

/// Main input state containing all drawing session state.
///
/// Owns the raster canvas and its undo history, the toolbar settings, and
/// the state machine that turns pointer and keyboard events into draw calls.
/// Front ends feed events in and read `needs_redraw`, `should_exit`, pending
/// confirmations and pending exports back out.
pub struct InputState {
    /// Raster surface holding every committed stroke and stamp
    canvas: Canvas,
    /// One PNG snapshot per completed stroke or stamp
    history: History,
    /// What starts and ends a session (mouse button or draw key)
    draw_mode: DrawMode,
    /// Letter key acting as the pen button in keyboard mode
    draw_key: char,
    /// Active brush
    brush: BrushKind,
    /// Size of click-brush stamps in pixels
    brush_size: f64,
    /// Stroke width in pixels
    stroke_width: f64,
    /// Current stroke color
    current_color: Color,
    /// Arrowhead length in pixels (from config)
    pub arrow_length: f64,
    /// Arrowhead angle in degrees (from config)
    pub arrow_angle: f64,
    /// Last known pointer position
    cursor: (i32, i32),
    /// Whether the session trigger (button or draw key) is currently held
    trigger_held: bool,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current drawing state machine
    state: DrawingState,
    /// Confirmation prompts
    pub ui_config: UiConfig,
    /// Background exports are flattened onto (`None` keeps transparency)
    pub export_background: Option<Color>,
    /// Whether the user requested to exit
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Destructive request awaiting confirmation
    pending_confirmation: Option<PendingConfirmation>,
    /// Pending export action (to be handled by the front end)
    pending_export: Option<Action>,
}

impl std::fmt::Debug for InputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputState")
            .field("canvas", &self.canvas)
            .field("history_len", &self.history.len())
            .field("draw_mode", &self.draw_mode)
            .field("brush", &self.brush)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InputState {
    /// Creates a new InputState with specified defaults.
    ///
    /// Out-of-range sizes are clamped and an invalid draw key falls back
    /// to `q`.
    ///
    /// # Arguments
    /// * `canvas` - Drawing surface (usually blank)
    /// * `color` - Initial stroke color
    /// * `stroke_width` - Initial stroke width in pixels
    /// * `brush` - Initial brush
    /// * `brush_size` - Initial click-brush size in pixels
    /// * `draw_mode` - Initial draw trigger
    /// * `draw_key` - Pen key for keyboard mode
    /// * `arrow_length` - Arrowhead length in pixels
    /// * `arrow_angle` - Arrowhead angle in degrees
    /// * `ui_config` - Confirmation prompts
    /// * `action_map` - Keybinding action map
    #[allow(clippy::too_many_arguments)]
    pub fn with_defaults(
        canvas: Canvas,
        color: Color,
        stroke_width: f64,
        brush: BrushKind,
        brush_size: f64,
        draw_mode: DrawMode,
        draw_key: char,
        arrow_length: f64,
        arrow_angle: f64,
        ui_config: UiConfig,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            canvas,
            history: History::new(),
            draw_mode,
            draw_key: normalize_draw_key(draw_key).unwrap_or('q'),
            brush,
            brush_size: clamp_finite(brush_size, BRUSH_SIZE_RANGE, DEFAULT_BRUSH_SIZE),
            stroke_width: clamp_finite(stroke_width, STROKE_WIDTH_RANGE, DEFAULT_STROKE_WIDTH),
            current_color: color,
            arrow_length,
            arrow_angle,
            cursor: (0, 0),
            trigger_held: false,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            ui_config,
            export_background: None,
            should_exit: false,
            needs_redraw: true,
            action_map,
            pending_confirmation: None,
            pending_export: None,
        }
    }

    /// Builds a session from a loaded configuration.
    ///
    /// # Errors
    /// Fails when the canvas surface cannot be created or the keybindings
    /// conflict.
    pub fn from_config(config: &Config) -> Result<Self, SessionError> {
        let canvas = Canvas::new(config.canvas.width, config.canvas.height)?;
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(SessionError::Keybindings)?;

        let mut state = Self::with_defaults(
            canvas,
            config.drawing.default_color.to_color(),
            config.drawing.default_stroke_width,
            config.drawing.default_brush,
            config.drawing.default_brush_size,
            config.drawing.draw_mode,
            config.drawing.draw_key,
            config.arrow.length,
            config.arrow.angle_degrees,
            config.ui.clone(),
            action_map,
        );

        if !config.canvas.transparent_export {
            state.export_background = Some(config.canvas.export_background.to_color());
        }

        info!(
            "Session ready: {}x{} canvas, {} mode (draw key '{}'), {} brush",
            state.canvas.width(),
            state.canvas.height(),
            state.draw_mode.label(),
            state.draw_key,
            state.brush.label()
        );

        Ok(state)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access, for pixel inspection.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True when there are strokes that would be lost on exit.
    pub fn has_unsaved_history(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn draw_key(&self) -> char {
        self.draw_key
    }

    pub fn brush(&self) -> BrushKind {
        self.brush
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Switches the draw trigger.
    ///
    /// Any stroke in progress is finalized first, so events belonging to
    /// the previous mode can no longer continue or end it.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        if mode == self.draw_mode {
            return;
        }
        self.end_session();
        self.draw_mode = mode;
        self.needs_redraw = true;
        info!("Draw mode set to {}", mode.label());
    }

    /// Sets the pen key used in keyboard mode.
    ///
    /// Returns `false` (and keeps the current key) unless `key` is a letter.
    pub fn set_draw_key(&mut self, key: char) -> bool {
        match normalize_draw_key(key) {
            Some(key) => {
                if self.trigger_held && self.draw_mode == DrawMode::Keyboard {
                    self.end_session();
                }
                self.draw_key = key;
                debug!("Draw key set to '{key}'");
                true
            }
            None => {
                warn!("Ignoring invalid draw key {key:?}; expected a letter a-z");
                false
            }
        }
    }

    /// Selects the brush, finalizing any stroke in progress.
    pub fn set_brush(&mut self, brush: BrushKind) {
        if brush == self.brush {
            return;
        }
        if self.is_drawing() {
            self.end_session();
        }
        self.brush = brush;
        self.needs_redraw = true;
        debug!("Brush set to {}", brush.label());
    }

    /// Sets the click-brush size, clamped to 20.0-200.0px. Returns the applied value.
    pub fn set_brush_size(&mut self, size: f64) -> f64 {
        self.brush_size = clamp_finite(size, BRUSH_SIZE_RANGE, DEFAULT_BRUSH_SIZE);
        self.needs_redraw = true;
        debug!("Brush size set to {:.1}px", self.brush_size);
        self.brush_size
    }

    /// Sets the stroke width, clamped to 1.0-50.0px. Returns the applied value.
    pub fn set_stroke_width(&mut self, width: f64) -> f64 {
        self.stroke_width = clamp_finite(width, STROKE_WIDTH_RANGE, DEFAULT_STROKE_WIDTH);
        self.needs_redraw = true;
        debug!("Stroke width set to {:.1}px", self.stroke_width);
        self.stroke_width
    }

    /// Adjusts the stroke width by a delta, clamping to the valid range.
    pub fn adjust_stroke_width(&mut self, delta: f64) -> f64 {
        self.set_stroke_width(self.stroke_width + delta)
    }

    /// Adjusts the brush size by a delta, clamping to the valid range.
    pub fn adjust_brush_size(&mut self, delta: f64) -> f64 {
        self.set_brush_size(self.brush_size + delta)
    }

    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
        debug!(
            "Color set to {} ({})",
            util::color_to_name(&color),
            color.to_hex()
        );
    }

    /// Starts a drawing session at `(x, y)`.
    ///
    /// Click brushes stamp their shape and record it immediately. The stroke
    /// brush enters `Drawing`. Ignored while the trigger is already held,
    /// which swallows key auto-repeat.
    pub(super) fn begin_session(&mut self, x: i32, y: i32) {
        if self.trigger_held {
            return;
        }
        self.trigger_held = true;
        self.cursor = (x, y);

        match self.stamp_at(x, y) {
            Some(stamp) => {
                match self.canvas.stamp(&stamp) {
                    Ok(()) => self.record_snapshot(),
                    Err(err) => error!("Failed to stamp {} brush: {err}", self.brush.label()),
                }
                self.needs_redraw = true;
            }
            None => {
                self.state = DrawingState::Drawing {
                    last_x: x,
                    last_y: y,
                    distance: 0.0,
                };
                debug!("Stroke started at ({x}, {y})");
            }
        }
    }

    /// Moves the cursor, extending the stroke in progress.
    pub(super) fn continue_session(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);

        let DrawingState::Drawing {
            last_x,
            last_y,
            distance,
        } = self.state
        else {
            return;
        };

        let length = util::segment_length(last_x, last_y, x, y);
        if length == 0.0 {
            return;
        }

        if let Err(err) =
            self.canvas
                .draw_segment((last_x, last_y), (x, y), self.current_color, self.stroke_width)
        {
            error!("Failed to draw stroke segment: {err}");
        }

        self.state = DrawingState::Drawing {
            last_x: x,
            last_y: y,
            distance: distance + length,
        };
        self.needs_redraw = true;
    }

    /// Finalizes any stroke still in progress, as if its trigger was released.
    ///
    /// Front ends call this when input stops arriving (end of a replay, window
    /// teardown) so the canvas never shows a mark without a history entry.
    pub fn finish(&mut self) {
        if self.trigger_held || self.is_drawing() {
            self.end_session();
        }
    }

    /// Ends the current session, recording the stroke if it moved.
    pub(super) fn end_session(&mut self) {
        self.trigger_held = false;

        if let DrawingState::Drawing { distance, .. } = self.state {
            self.state = DrawingState::Idle;
            if distance > 0.0 {
                self.record_snapshot();
                debug!("Stroke finished after {distance:.1}px");
            } else {
                debug!("Discarding zero-length stroke");
            }
        }
    }

    /// Stamp for the active click brush at `(x, y)`, `None` for the stroke brush.
    fn stamp_at(&self, x: i32, y: i32) -> Option<Stamp> {
        let (color, thick, size) = (self.current_color, self.stroke_width, self.brush_size);
        match self.brush {
            BrushKind::Stroke => None,
            BrushKind::Circle => Some(Stamp::circle(x, y, size, color, thick)),
            BrushKind::Rect => Some(Stamp::rect(x, y, size, color, thick)),
            BrushKind::Arrow => Some(Stamp::arrow(
                x,
                y,
                size,
                color,
                thick,
                self.arrow_length,
                self.arrow_angle,
            )),
            BrushKind::ListNode => Some(Stamp::list_node(
                x,
                y,
                size,
                color,
                thick,
                self.arrow_length,
                self.arrow_angle,
            )),
        }
    }

    fn record_snapshot(&mut self) {
        match self.canvas.snapshot() {
            Ok(snapshot) => self.history.push(snapshot),
            Err(err) => error!("Failed to snapshot canvas; history entry lost: {err}"),
        }
    }

    /// Reverts the most recent stroke or stamp.
    ///
    /// A stroke in progress is finalized first, so it is the one removed.
    /// The previous snapshot is decoded before history is touched: if that
    /// fails, both history and canvas stay as they were.
    ///
    /// # Returns
    /// `true` if an entry was undone
    pub fn undo(&mut self) -> bool {
        self.end_session();

        if self.history.is_empty() {
            debug!("Nothing to undo");
            return false;
        }

        let restored = match self.history.previous() {
            Some(previous) => self.canvas.restore(previous),
            None => self.canvas.clear(),
        };

        match restored {
            Ok(()) => {
                self.history.pop();
                self.needs_redraw = true;
                debug!("Undo: {} history entries remain", self.history.len());
                true
            }
            Err(err) => {
                error!("Undo failed, keeping current canvas: {err}");
                false
            }
        }
    }

    /// Clears the canvas and history unconditionally.
    pub fn reset(&mut self) {
        self.end_session();
        if let Err(err) = self.canvas.clear() {
            error!("Failed to clear canvas: {err}");
        }
        self.history.clear();
        self.pending_confirmation = None;
        self.needs_redraw = true;
        info!("Canvas reset");
    }

    /// Resets now, or asks for confirmation first when `ui.confirm_reset` is set.
    pub fn request_reset(&mut self) {
        if self.ui_config.confirm_reset {
            self.pending_confirmation = Some(PendingConfirmation::Reset);
            self.needs_redraw = true;
            info!("Reset requested; awaiting confirmation");
        } else {
            self.reset();
        }
    }

    /// Exits now, or asks for confirmation first when unsaved history exists.
    pub fn request_exit(&mut self) {
        if self.has_unsaved_history() && self.ui_config.confirm_exit_with_history {
            self.pending_confirmation = Some(PendingConfirmation::Exit);
            self.needs_redraw = true;
            info!(
                "Exit requested with {} unsaved history entries; awaiting confirmation",
                self.history.len()
            );
        } else {
            self.should_exit = true;
        }
    }

    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.pending_confirmation
    }

    /// Resolves the pending confirmation, carrying out the request if accepted.
    ///
    /// # Returns
    /// The request that was resolved, if any was pending
    pub fn confirm_pending(&mut self, accepted: bool) -> Option<PendingConfirmation> {
        let pending = self.pending_confirmation.take()?;
        if accepted {
            match pending {
                PendingConfirmation::Reset => self.reset(),
                PendingConfirmation::Exit => self.should_exit = true,
            }
        } else {
            debug!("{pending:?} cancelled");
        }
        self.needs_redraw = true;
        Some(pending)
    }

    /// Takes and clears any pending export action.
    ///
    /// Front ends call this after feeding events and fulfil the request
    /// through [`crate::export`].
    pub fn take_pending_export(&mut self) -> Option<Action> {
        self.pending_export.take()
    }

    /// Stores an export action for retrieval by the front end.
    pub(super) fn set_pending_export(&mut self, action: Action) {
        self.pending_export = Some(action);
    }

    /// Encodes the canvas for export, flattened onto the export background.
    pub fn export_png(&self) -> Result<Vec<u8>, CanvasError> {
        self.canvas.to_png(self.export_background)
    }

    /// Look up an action for the given key and modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    pub(super) fn trigger_held(&self) -> bool {
        self.trigger_held
    }
}
