//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the core drawing types used by the whiteboard:
//! - [`Color`]: RGBA color representation with the swatch palette
//! - [`Stamp`]: click-brush shapes (circle, rectangle, arrow, list node)
//! - [`Canvas`]: the raster surface, with PNG snapshot encode/decode
//! - Rendering functions for Cairo-based output

pub mod canvas;
pub mod color;
pub mod render;
pub mod stamp;

pub use canvas::{Canvas, CanvasError};
pub use color::Color;
pub use stamp::{ListNodeLayout, Stamp};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
