use crate::geometry::{DragQuadrant, Point, classify};
use crate::input::events::MouseButton;
use log::debug;

use super::{InputState, SelectionState};

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Left click while Idle: anchor and cursor both move to the click, Dragging
    /// - Left click while Drawn: only the cursor moves, the anchor is kept
    /// - Other buttons and clicks while the view popup is open are ignored
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left || self.viewing {
            return;
        }

        let point = self.clamp_to_screen(Point::new(x, y));
        match self.state {
            SelectionState::Idle => {
                self.anchor = point;
                self.cursor = point;
            }
            SelectionState::Drawn => {
                self.cursor = point;
            }
            SelectionState::Dragging => return,
        }

        self.state = SelectionState::Dragging;
        self.needs_redraw = true;
    }

    /// Processes mouse motion. Only a drag moves the cursor point.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        if self.state != SelectionState::Dragging {
            return;
        }

        let point = self.clamp_to_screen(Point::new(x, y));
        if point != self.cursor {
            self.cursor = point;
            self.needs_redraw = true;
        }
    }

    /// Processes mouse button release events.
    ///
    /// Ends a drag in Drawn when the release produced a real rectangle, or in
    /// Idle when it did not (click without drag, or a zero-width/height box).
    pub fn on_mouse_release(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left || self.state != SelectionState::Dragging {
            return;
        }

        self.cursor = self.clamp_to_screen(Point::new(x, y));
        let quadrant = classify(self.anchor, self.cursor);

        self.state = if quadrant == DragQuadrant::Degenerate {
            debug!("Degenerate selection at {:?}, back to idle", self.cursor);
            SelectionState::Idle
        } else {
            debug!(
                "Selection drawn {:?} -> {:?} ({:?})",
                self.anchor, self.cursor, quadrant
            );
            SelectionState::Drawn
        };
        self.needs_redraw = true;
    }
}
