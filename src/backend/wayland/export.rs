//! Export bookkeeping for the Wayland loop.
//!
//! Keeps the in-flight flag alongside the ExportManager so the event loop only
//! polls for outcomes instead of tracking flags itself.

use crate::export::{ExportManager, ExportOutcome};

/// Tracks the export manager and whether a request is outstanding.
pub struct ExportState {
    manager: ExportManager,
    in_progress: bool,
}

impl ExportState {
    pub fn new(manager: ExportManager) -> Self {
        Self {
            manager,
            in_progress: false,
        }
    }

    pub fn manager(&self) -> &ExportManager {
        &self.manager
    }

    /// Returns `true` if an export request is currently active.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn mark_in_progress(&mut self) {
        self.in_progress = true;
    }

    /// Takes a finished outcome, clearing the in-flight flag.
    pub fn poll(&mut self) -> Option<ExportOutcome> {
        if !self.in_progress {
            return None;
        }
        let outcome = self.manager.try_take_result()?;
        self.in_progress = false;
        Some(outcome)
    }
}
