//! Data types for selection export.

use crate::config::Action;
use crate::geometry::Size;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where a cropped selection is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Clipboard,
    File,
    Print,
    Editor,
}

impl ExportKind {
    /// Export kind triggered by a keybinding action, if any.
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::CopySelection => Some(ExportKind::Clipboard),
            Action::SaveSelection => Some(ExportKind::File),
            Action::PrintSelection => Some(ExportKind::Print),
            Action::EditSelection => Some(ExportKind::Editor),
            _ => None,
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::Clipboard => "clipboard",
            ExportKind::File => "file",
            ExportKind::Print => "printer",
            ExportKind::Editor => "editor",
        };
        f.write_str(name)
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub kind: ExportKind,
    /// Pixel size actually delivered (print output may be scaled down)
    pub size: Size,
    /// Saved file, or the temporary file handed to the editor
    pub path: Option<PathBuf>,
}

/// Outcome of an export request (success or failure).
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Success(ExportResult),
    Failed { kind: ExportKind, message: String },
}

impl ExportOutcome {
    /// Notification summary and body.
    pub fn notification_text(&self) -> (String, String) {
        match self {
            ExportOutcome::Success(result) => {
                let summary = match result.kind {
                    ExportKind::Clipboard => "Selection copied",
                    ExportKind::File => "Selection saved",
                    ExportKind::Print => "Selection sent to printer",
                    ExportKind::Editor => "Selection opened in editor",
                };
                let body = match &result.path {
                    Some(path) if result.kind == ExportKind::File => {
                        format!("Saved to {}", path.display())
                    }
                    _ => format!("{}x{} pixels", result.size.width, result.size.height),
                };
                (summary.to_string(), body)
            }
            ExportOutcome::Failed { kind, message } => {
                (format!("Export to {} failed", kind), message.clone())
            }
        }
    }
}

/// Status of the export worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Idle,
    InProgress,
    Success,
    Failed(String),
}

/// Errors that can occur while exporting a selection.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to save selection: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Clipboard operation failed: {0}")]
    ClipboardError(String),

    #[error("Printing failed: {0}")]
    PrintError(String),

    #[error("Could not open editor: {0}")]
    EditorError(String),

    #[error("Image encoding error: {0}")]
    EncodeError(String),

    #[error("Export manager not running")]
    NotRunning,
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::EncodeError(err.to_string())
    }
}
