//! Brush type selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush type: what a drawing session puts on the canvas.
///
/// `Stroke` draws continuously while the session is active; every other
/// brush is a click brush that stamps its shape once, at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BrushKind {
    /// Freehand polyline following the cursor
    #[default]
    Stroke,
    /// Circle outline, diameter = brush size
    Circle,
    /// Square outline, side = brush size
    Rect,
    /// Arrow pointing right, length = brush size
    Arrow,
    /// Linked-list node glyph, width = brush size
    ListNode,
}

impl BrushKind {
    /// All brushes in toolbar order.
    pub const ALL: [BrushKind; 5] = [
        BrushKind::Stroke,
        BrushKind::Circle,
        BrushKind::Rect,
        BrushKind::Arrow,
        BrushKind::ListNode,
    ];

    /// True for brushes rendered once per click.
    pub fn is_click_brush(self) -> bool {
        !matches!(self, BrushKind::Stroke)
    }

    pub fn label(self) -> &'static str {
        match self {
            BrushKind::Stroke => "Stroke",
            BrushKind::Circle => "Circle",
            BrushKind::Rect => "Rect",
            BrushKind::Arrow => "Arrow",
            BrushKind::ListNode => "List node",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stroke_is_continuous() {
        for brush in BrushKind::ALL {
            assert_eq!(brush.is_click_brush(), brush != BrushKind::Stroke);
        }
    }

    #[test]
    fn kebab_case_names_round_trip_through_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            brush: BrushKind,
        }
        let parsed: Wrapper = toml::from_str("brush = \"list-node\"").unwrap();
        assert_eq!(parsed.brush, BrushKind::ListNode);
    }
}
