//! Click-brush stamps: shapes rendered in one go at the pointer position.

use super::color::Color;

/// A shape rasterized immediately when a click brush is used.
///
/// Stamps are not kept around after rendering; the canvas pixels and the
/// history snapshots are the only record of them.
#[derive(Clone, Debug, PartialEq)]
pub enum Stamp {
    /// Circle outline centered on the click
    Circle {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Radius in pixels (half the brush size)
        radius: f64,
        /// Outline color
        color: Color,
        /// Outline thickness in pixels
        thick: f64,
    },
    /// Square outline centered on the click
    Rect {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        /// Side length in pixels
        size: f64,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
    /// Horizontal arrow starting at the click
    Arrow {
        /// Tail X coordinate
        x1: f64,
        /// Tail Y coordinate
        y1: f64,
        /// Tip X coordinate
        x2: f64,
        /// Tip Y coordinate
        y2: f64,
        /// Arrow color
        color: Color,
        /// Line thickness in pixels
        thick: f64,
        /// Arrowhead length in pixels
        arrow_length: f64,
        /// Arrowhead angle in degrees
        arrow_angle: f64,
    },
    /// Linked-list node glyph: value cell, pointer cell and outgoing arrow
    ListNode {
        /// Geometry of the glyph
        layout: ListNodeLayout,
        /// Glyph color
        color: Color,
        /// Line thickness in pixels
        thick: f64,
        /// Arrowhead length in pixels
        arrow_length: f64,
        /// Arrowhead angle in degrees
        arrow_angle: f64,
    },
}

/// Resolved geometry of a list-node glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListNodeLayout {
    /// Top-left corner of the node box
    pub x: f64,
    pub y: f64,
    /// Box width (the brush size)
    pub width: f64,
    /// Box height (half the brush size)
    pub height: f64,
    /// X coordinate of the divider between value and pointer cells
    pub divider_x: f64,
    /// Center of the pointer dot
    pub dot: (f64, f64),
    /// Radius of the pointer dot
    pub dot_radius: f64,
    /// Where the outgoing pointer arrow ends
    pub arrow_tip: (f64, f64),
}

impl ListNodeLayout {
    /// Lays out a node whose top-left corner sits at `(x, y)`.
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        let width = size;
        let height = size / 2.0;
        let pointer_cell = size / 4.0;
        let divider_x = x + width - pointer_cell;
        let dot = (divider_x + pointer_cell / 2.0, y + height / 2.0);
        Self {
            x,
            y,
            width,
            height,
            divider_x,
            dot,
            dot_radius: (pointer_cell / 6.0).max(1.0),
            arrow_tip: (dot.0 + size / 2.0, dot.1),
        }
    }
}

impl Stamp {
    /// Circle of diameter `size` centered on `(x, y)`.
    pub fn circle(x: i32, y: i32, size: f64, color: Color, thick: f64) -> Self {
        Stamp::Circle {
            cx: x as f64,
            cy: y as f64,
            radius: size / 2.0,
            color,
            thick,
        }
    }

    /// Square of side `size` centered on `(x, y)`.
    pub fn rect(x: i32, y: i32, size: f64, color: Color, thick: f64) -> Self {
        Stamp::Rect {
            x: x as f64 - size / 2.0,
            y: y as f64 - size / 2.0,
            size,
            color,
            thick,
        }
    }

    /// Arrow of length `size` pointing right from `(x, y)`.
    pub fn arrow(
        x: i32,
        y: i32,
        size: f64,
        color: Color,
        thick: f64,
        arrow_length: f64,
        arrow_angle: f64,
    ) -> Self {
        Stamp::Arrow {
            x1: x as f64,
            y1: y as f64,
            x2: x as f64 + size,
            y2: y as f64,
            color,
            thick,
            arrow_length,
            arrow_angle,
        }
    }

    /// List-node glyph anchored at its top-left corner.
    pub fn list_node(
        x: i32,
        y: i32,
        size: f64,
        color: Color,
        thick: f64,
        arrow_length: f64,
        arrow_angle: f64,
    ) -> Self {
        Stamp::ListNode {
            layout: ListNodeLayout::new(x as f64, y as f64, size),
            color,
            thick,
            arrow_length,
            arrow_angle,
        }
    }
}
