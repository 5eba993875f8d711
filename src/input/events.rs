//! Generic input event types for front-end independence.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Front ends map their native key codes to these values before handing
/// them to [`InputState`](super::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses the names used in keybindings and scripts ("a", "Escape", "Ctrl", ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Return" | "Enter" => Key::Return,
            "Backspace" => Key::Backspace,
            "Space" => Key::Space,
            "Shift" => Key::Shift,
            "Ctrl" | "Control" => Key::Ctrl,
            "Alt" => Key::Alt,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }

    /// Name used for keybinding lookup, if the key can be bound.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Space => Some("Space".to_string()),
            _ => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_handles_specials_and_chars() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Ctrl"), Key::Ctrl);
        assert_eq!(Key::from_name("q"), Key::Char('q'));
        assert_eq!(Key::from_name("F13"), Key::Unknown);
    }

    #[test]
    fn modifiers_have_no_binding_name() {
        assert_eq!(Key::Shift.binding_name(), None);
        assert_eq!(Key::Char('z').binding_name().as_deref(), Some("z"));
    }
}
