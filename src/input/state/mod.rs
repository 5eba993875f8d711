mod actions;
mod core;
mod mouse;

pub use core::{DrawingState, InputState, PendingConfirmation, SessionError};

/// Valid stroke width range in pixels (min, max).
pub const STROKE_WIDTH_RANGE: (f64, f64) = (1.0, 50.0);

/// Valid click-brush size range in pixels (min, max).
pub const BRUSH_SIZE_RANGE: (f64, f64) = (20.0, 200.0);

/// Stroke width used when no usable value is given.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Click-brush size used when no usable value is given.
pub const DEFAULT_BRUSH_SIZE: f64 = 50.0;

/// Clamps `value` into `range`, substituting `fallback` for NaN and infinities.
pub fn clamp_finite(value: f64, (min, max): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
