//! Handing a selection to an external image editor.

use super::types::ExportError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Editor launch settings.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    /// Program plus arguments; the image path is appended last.
    pub command: String,
    /// Where the temporary PNG is written.
    pub temp_dir: PathBuf,
}

impl EditorSettings {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            temp_dir: default_temp_dir(),
        }
    }
}

/// Editor input file name; each edit overwrites the previous one.
const EDIT_FILE_NAME: &str = "edit.png";

fn default_temp_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("leercopy")
}

/// Writes the PNG to the editor temp file and launches the editor on it.
///
/// The editor is not waited on; it outlives the overlay.
pub fn open_in_editor(png_data: &[u8], settings: &EditorSettings) -> Result<PathBuf, ExportError> {
    let path = write_temp_png(png_data, &settings.temp_dir)?;
    launch(&settings.command, &path)?;
    Ok(path)
}

fn write_temp_png(png_data: &[u8], dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(EDIT_FILE_NAME);
    fs::write(&path, png_data)?;
    log::debug!("Wrote editor input to {}", path.display());
    Ok(path)
}

fn launch(command: &str, image_path: &Path) -> Result<(), ExportError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ExportError::EditorError("editor command is empty".to_string()))?;

    let child = Command::new(program)
        .args(parts)
        .arg(image_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ExportError::EditorError(format!("failed to launch '{}': {}", program, e)))?;

    log::info!(
        "Launched editor '{}' (pid {}) on {}",
        program,
        child.id(),
        image_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_command_is_rejected_after_writing_file() {
        let temp = TempDir::new().unwrap();
        let settings = EditorSettings {
            command: "   ".to_string(),
            temp_dir: temp.path().join("edit"),
        };

        let err = open_in_editor(b"png", &settings).unwrap_err();
        assert!(matches!(err, ExportError::EditorError(_)));
        assert_eq!(fs::read_dir(temp.path().join("edit")).unwrap().count(), 1);
    }

    #[test]
    fn missing_program_reports_editor_error() {
        let temp = TempDir::new().unwrap();
        let settings = EditorSettings {
            command: "leercopy-no-such-editor --flag".to_string(),
            temp_dir: temp.path().to_path_buf(),
        };
        let err = open_in_editor(b"png", &settings).unwrap_err();
        assert!(err.to_string().contains("leercopy-no-such-editor"));
    }

    #[cfg(unix)]
    #[test]
    fn launches_command_with_image_path() {
        let temp = TempDir::new().unwrap();
        let settings = EditorSettings {
            command: "true".to_string(),
            temp_dir: temp.path().to_path_buf(),
        };
        let path = open_in_editor(b"png-bytes", &settings).unwrap();
        assert_eq!(path.extension().unwrap(), "png");
        assert_eq!(fs::read(path).unwrap(), b"png-bytes");
    }

    #[cfg(unix)]
    #[test]
    fn repeated_edits_reuse_one_file() {
        let temp = TempDir::new().unwrap();
        let settings = EditorSettings {
            command: "true".to_string(),
            temp_dir: temp.path().to_path_buf(),
        };

        let first = open_in_editor(b"first", &settings).unwrap();
        let second = open_in_editor(b"second", &settings).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
        assert_eq!(fs::read(second).unwrap(), b"second");
    }
}
