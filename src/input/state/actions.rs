use crate::config::Action;
use crate::geometry::{NudgeDirection, Point, nudge};
use crate::input::events::Key;

use super::{InputState, SelectionState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles modifier tracking, arrow-key nudging of a drawn selection, the
    /// view popup, and every configurable keybinding.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let action = key
            .binding_name()
            .and_then(|name| self.find_action(&name));

        // The view popup swallows everything except its own close keys
        if self.viewing {
            if key == Key::Escape || action == Some(Action::ViewSelection) {
                self.viewing = false;
                self.needs_redraw = true;
            }
            return;
        }

        if let Some(direction) = nudge_direction(key) {
            self.nudge_selection(direction);
            return;
        }

        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    /// Handle an action triggered by a keybinding.
    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Exit => {
                self.should_exit = true;
            }
            Action::ClearSelection => {
                self.clear_selection();
            }
            Action::ToggleTips => {
                self.show_tips = !self.show_tips;
                self.needs_redraw = true;
            }
            Action::SelectAll => self.select_all(),
            Action::ToggleBorder => {
                self.border.enabled = !self.border.enabled;
                log::debug!("Border {}", if self.border.enabled { "on" } else { "off" });
                self.needs_redraw = true;
            }
            Action::ViewSelection => {
                if self.selection_rect().is_some() {
                    self.viewing = true;
                    self.needs_redraw = true;
                } else {
                    log::debug!("No drawn selection to view");
                }
            }
            Action::CopySelection
            | Action::SaveSelection
            | Action::PrintSelection
            | Action::EditSelection => {
                if self.selection_rect().is_none() {
                    log::debug!("Ignoring {:?}: no drawn selection", action);
                    return;
                }

                // Exports are run by the backend, which owns the snapshot
                log::debug!("Export action {:?} pending for backend", action);
                self.set_pending_export(action);

                // External tools may steal focus and swallow the key releases
                self.modifiers.reset();
            }
        }
    }

    /// Selects the whole screen.
    fn select_all(&mut self) {
        if self.state == SelectionState::Dragging {
            return;
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            log::debug!("Select all ignored: screen size unknown");
            return;
        }

        self.anchor = Point::ORIGIN;
        self.cursor = Point::new(
            self.screen_width.min(i32::MAX as u32) as i32,
            self.screen_height.min(i32::MAX as u32) as i32,
        );
        self.state = SelectionState::Drawn;
        self.needs_redraw = true;
    }

    /// Moves one edge of a drawn selection by the modifier-dependent step.
    fn nudge_selection(&mut self, direction: NudgeDirection) {
        if self.state != SelectionState::Drawn {
            return;
        }

        let step = self.modifiers.nudge_step();
        let (anchor, cursor) = nudge(self.anchor, self.cursor, direction, step);
        self.anchor = self.clamp_to_screen(anchor);
        self.cursor = self.clamp_to_screen(cursor);
        self.needs_redraw = true;
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases change state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }
}

fn nudge_direction(key: Key) -> Option<NudgeDirection> {
    match key {
        Key::Up => Some(NudgeDirection::Up),
        Key::Down => Some(NudgeDirection::Down),
        Key::Left => Some(NudgeDirection::Left),
        Key::Right => Some(NudgeDirection::Right),
        _ => None,
    }
}
