//! Draw-trigger mode selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What acts as the "pen down" signal for a drawing session.
///
/// Only events belonging to the active mode start or end sessions, so
/// switching modes never leaves the other mode's handling live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DrawMode {
    /// Sessions follow the left mouse button (down/up, leaving the canvas ends it)
    #[default]
    Pointer,
    /// Sessions follow the configured draw key (down/up) at the cursor position
    Keyboard,
}

impl DrawMode {
    /// The other mode, for the toggle action.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pointer => Self::Keyboard,
            Self::Keyboard => Self::Pointer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pointer => "Mouse",
            Self::Keyboard => "Keyboard",
        }
    }
}

/// Keys that can be configured as the draw key.
pub const DRAW_KEYS: &[char] = &[
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', 'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l',
    'z', 'x', 'c', 'v', 'b', 'n', 'm',
];

/// Normalizes a draw key candidate, returning `None` unless it is a letter key.
pub fn normalize_draw_key(c: char) -> Option<char> {
    let lower = c.to_ascii_lowercase();
    DRAW_KEYS.contains(&lower).then_some(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_modes() {
        assert_eq!(DrawMode::Pointer.toggled(), DrawMode::Keyboard);
        assert_eq!(DrawMode::Keyboard.toggled(), DrawMode::Pointer);
    }

    #[test]
    fn draw_keys_are_letters_only() {
        assert_eq!(normalize_draw_key('Q'), Some('q'));
        assert_eq!(normalize_draw_key('m'), Some('m'));
        assert_eq!(normalize_draw_key('1'), None);
        assert_eq!(normalize_draw_key('+'), None);
    }
}
