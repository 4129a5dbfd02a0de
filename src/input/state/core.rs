//! Selection state machine and input state management.

use crate::config::{Action, KeyBinding};
use crate::draw::{BorderSpec, ClearRequest};
use crate::geometry::{NormalizeMode, Point, Rect, normalize};
use crate::input::modifiers::Modifiers;
use std::collections::HashMap;

/// Lifecycle of the on-screen selection.
///
/// Idle until the primary button goes down, Dragging while it is held, and
/// Drawn once a non-degenerate rectangle has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging,
    Drawn,
}

/// Main input state for one overlay session.
///
/// Holds the two raw selection points, the selection state, modifier keys and
/// UI flags. Rectangles are never stored; they are derived from `anchor` and
/// `cursor` whenever they are needed.
pub struct InputState {
    /// Fixed corner, set by the first click of a drag
    pub anchor: Point,
    /// Moving corner, follows the pointer while dragging
    pub cursor: Point,
    /// Current selection state
    pub state: SelectionState,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Border drawn around the selection (toggled via keybinding)
    pub border: BorderSpec,
    /// Whether the key tips panel is visible
    pub show_tips: bool,
    /// Whether the view popup is open
    pub viewing: bool,
    /// Whether user requested to exit the overlay
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Screen width in pixels (set by backend from the snapshot)
    pub screen_width: u32,
    /// Screen height in pixels (set by backend from the snapshot)
    pub screen_height: u32,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Export action waiting for the backend
    pending_export: Option<Action>,
    /// Clear queued for the next frame plan
    pending_clear: Option<ClearRequest>,
}

impl InputState {
    /// Creates a new InputState with specified defaults.
    ///
    /// Screen dimensions default to 0 and should be updated by the backend
    /// once the snapshot is known (see `update_screen_dimensions`).
    pub fn with_defaults(
        border: BorderSpec,
        show_tips: bool,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            anchor: Point::ORIGIN,
            cursor: Point::ORIGIN,
            state: SelectionState::Idle,
            modifiers: Modifiers::new(),
            border,
            show_tips,
            viewing: false,
            should_exit: false,
            needs_redraw: true,
            screen_width: 0,
            screen_height: 0,
            action_map,
            pending_export: None,
            pending_clear: None,
        }
    }

    /// Updates screen dimensions.
    pub fn update_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Clamps a point to the screen.
    pub(super) fn clamp_to_screen(&self, point: Point) -> Point {
        point.clamped(self.screen_width, self.screen_height)
    }

    /// Export rectangle of the drawn selection.
    ///
    /// `None` unless a selection is drawn and non-degenerate.
    pub fn selection_rect(&self) -> Option<Rect> {
        if self.state != SelectionState::Drawn {
            return None;
        }
        normalize(self.anchor, self.cursor, NormalizeMode::Export)
    }

    /// Raw `(anchor, cursor)` pair while a selection should be painted.
    pub fn visible_selection(&self) -> Option<(Point, Point)> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging | SelectionState::Drawn => Some((self.anchor, self.cursor)),
        }
    }

    /// Resets the selection and queues a backdrop-only repaint.
    pub(super) fn clear_selection(&mut self) {
        self.anchor = Point::ORIGIN;
        self.cursor = Point::ORIGIN;
        self.state = SelectionState::Idle;
        self.viewing = false;
        self.pending_clear = Some(ClearRequest);
        self.needs_redraw = true;
    }

    /// Takes the queued clear request, if any.
    pub fn take_clear_request(&mut self) -> Option<ClearRequest> {
        self.pending_clear.take()
    }

    /// Look up an action for the given key and the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Takes and clears any pending export action.
    pub fn take_pending_export(&mut self) -> Option<Action> {
        self.pending_export.take()
    }

    pub(super) fn set_pending_export(&mut self, action: Action) {
        self.pending_export = Some(action);
    }
}
