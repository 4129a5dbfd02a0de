use std::{path::PathBuf, sync::Arc};

use crate::export::{
    clipboard,
    editor::{self, EditorSettings},
    file::{self, FileSaveConfig},
    print,
    types::ExportError,
};

/// Abstraction over saving encoded selections to disk.
pub trait ExportFileSaver: Send + Sync {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError>;
}

/// Abstraction over copying PNG data to the clipboard.
pub trait ExportClipboard: Send + Sync {
    fn copy(&self, png_data: &[u8]) -> Result<(), ExportError>;
}

/// Abstraction over the print spooler.
pub trait ExportPrinter: Send + Sync {
    fn print(&self, png_data: &[u8], command: &str) -> Result<(), ExportError>;
}

/// Abstraction over launching an external editor. Returns the file handed to it.
pub trait ExportEditor: Send + Sync {
    fn open(&self, png_data: &[u8], settings: &EditorSettings) -> Result<PathBuf, ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ExportFileSaver>,
    pub clipboard: Arc<dyn ExportClipboard>,
    pub printer: Arc<dyn ExportPrinter>,
    pub editor: Arc<dyn ExportEditor>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(DefaultFileSaver),
            clipboard: Arc::new(DefaultClipboard),
            printer: Arc::new(DefaultPrinter),
            editor: Arc::new(DefaultEditor),
        }
    }
}

struct DefaultFileSaver;
struct DefaultClipboard;
struct DefaultPrinter;
struct DefaultEditor;

impl ExportFileSaver for DefaultFileSaver {
    fn save(&self, image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, ExportError> {
        file::save_image(image_data, config)
    }
}

impl ExportClipboard for DefaultClipboard {
    fn copy(&self, png_data: &[u8]) -> Result<(), ExportError> {
        clipboard::copy_png(png_data)
    }
}

impl ExportPrinter for DefaultPrinter {
    fn print(&self, png_data: &[u8], command: &str) -> Result<(), ExportError> {
        print::send_to_printer(png_data, command)
    }
}

impl ExportEditor for DefaultEditor {
    fn open(&self, png_data: &[u8], settings: &EditorSettings) -> Result<PathBuf, ExportError> {
        editor::open_in_editor(png_data, settings)
    }
}
