//! Backend-neutral input event types.

/// Generic key representation.
///
/// Backend implementations map their native key codes to these values so the
/// selection state machine never sees keysyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Space,
    /// Arrow keys (nudge the selection)
    Up,
    Down,
    Left,
    Right,
    Shift,
    Ctrl,
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used for keybinding lookup, or `None` for keys that never bind.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Space => Some("Space".to_string()),
            _ => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button, drags out the selection
    Left,
    Right,
    Middle,
}
