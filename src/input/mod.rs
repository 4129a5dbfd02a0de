//! Input handling and the selection state machine.
//!
//! This module translates backend keyboard and mouse events into selection
//! changes and overlay commands. It owns the two raw selection points and the
//! [`SelectionState`]; every rectangle is derived from them on demand.

pub mod events;
pub mod modifiers;
pub mod state;

pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{InputState, SelectionState};
