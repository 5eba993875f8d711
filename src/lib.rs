//! Raster whiteboard engine.
//!
//! A freehand drawing canvas with a linear undo history of PNG snapshots,
//! pointer- or keyboard-triggered drawing sessions, click-brush stamps
//! (circle, rectangle, arrow, list node) and clipboard/file export.
//!
//! Front ends translate their native events into [`input::InputState`]
//! calls; the `sketchboard` binary does so from recorded [`script`]s.

pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
