//! Utility functions for colors and stroke geometry.
//!
//! This module provides:
//! - Color name mapping for swatches and config values
//! - Arrowhead geometry calculations
//! - Segment length for stroke distance accounting

use crate::draw::{Color, color::*};

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates arrowhead points with custom length and angle.
///
/// Creates a V-shaped arrowhead at the tip `(tip_x, tip_y)` pointing away from
/// the tail `(tail_x, tail_y)`. The arrowhead length is capped at 30% of the
/// shaft length so short arrows don't end up all head.
///
/// # Returns
/// Array of two points `[(left_x, left_y), (right_x, right_y)]` for the arrowhead lines.
/// If the shaft is too short (< 1 pixel), both points equal the tip.
pub fn calculate_arrowhead_custom(
    tip_x: f64,
    tip_y: f64,
    tail_x: f64,
    tail_y: f64,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let dx = tip_x - tail_x;
    let dy = tip_y - tail_y;
    let line_length = (dx * dx + dy * dy).sqrt();

    if line_length < 1.0 {
        return [(tip_x, tip_y), (tip_x, tip_y)];
    }

    // Unit vector pointing from tail to tip
    let ux = dx / line_length;
    let uy = dy / line_length;

    let arrow_length = length.min(line_length * 0.3);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left_x = tip_x - arrow_length * (ux * cos_a - uy * sin_a);
    let left_y = tip_y - arrow_length * (uy * cos_a + ux * sin_a);

    let right_x = tip_x - arrow_length * (ux * cos_a + uy * sin_a);
    let right_y = tip_y - arrow_length * (uy * cos_a - ux * sin_a);

    [(left_x, left_y), (right_x, right_y)]
}

/// Euclidean distance between two pointer positions.
pub fn segment_length(x1: i32, y1: i32, x2: i32, y2: i32) -> f64 {
    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    (dx * dx + dy * dy).sqrt()
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and the swatch actions. Accepts the
/// palette names (case-insensitive) and `#rrggbb` / `#rgb` hex strings.
pub fn name_to_color(name: &str) -> Option<Color> {
    if name.trim_start().starts_with('#') {
        return Color::from_hex(name);
    }
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
/// Returns "Custom" if the color doesn't match any swatch.
pub fn color_to_name(color: &Color) -> &'static str {
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow"
    } else if color.r > 0.9 && (0.4..=0.6).contains(&color.g) && color.b < 0.1 {
        "Orange"
    } else if color.r > 0.9 && color.g < 0.1 && color.b > 0.9 {
        "Pink"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else {
        "Custom"
    }
}
