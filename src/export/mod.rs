//! Delivery of cropped selections: clipboard, file, printer and editor.
//!
//! Exports run on a tokio runtime behind [`ExportManager`] so the Wayland
//! event loop never blocks on encoding or external commands.

pub mod clipboard;
pub mod dependencies;
pub mod editor;
pub mod file;
pub mod manager;
pub mod pipeline;
pub mod print;
pub mod types;

#[cfg(test)]
mod tests;

pub use dependencies::ExportDependencies;
pub use manager::ExportManager;
pub use pipeline::ExportSettings;
pub use types::{ExportError, ExportKind, ExportOutcome, ExportResult, ExportStatus};
