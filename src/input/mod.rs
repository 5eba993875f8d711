//! Input handling and drawing session state machine.
//!
//! This module translates front-end keyboard and mouse events into canvas
//! draw calls and undo history updates. It holds the toolbar state (draw mode,
//! draw key, brush, sizes, color) and the state machine for freehand strokes.

pub mod brush;
pub mod events;
pub mod mode;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use brush::BrushKind;
pub use events::{Key, MouseButton};
pub use mode::DrawMode;
pub use modifiers::Modifiers;
pub use state::{DrawingState, InputState, PendingConfirmation, SessionError};
