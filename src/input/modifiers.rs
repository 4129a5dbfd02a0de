//! Keyboard modifier state tracking.

/// Nudge distance in pixels for a plain arrow key.
pub const NUDGE_STEP: i32 = 1;

/// Multiplier applied to the nudge step while Shift is held.
pub const NUDGE_FAST_FACTOR: i32 = 3;

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently pressed. Used for keybinding
/// matching and to size arrow-key nudges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed nudge step for the current modifiers.
    ///
    /// Ctrl inverts the direction (pulls the edge in), Shift triples the
    /// distance: 1, -1, 3 or -3.
    pub fn nudge_step(&self) -> i32 {
        let mut step = NUDGE_STEP;
        if self.shift {
            step *= NUDGE_FAST_FACTOR;
        }
        if self.ctrl {
            step = -step;
        }
        step
    }

    /// Releases every modifier.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
