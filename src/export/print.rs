//! Sending selections to the system print spooler.

use super::types::ExportError;
use crate::geometry::{Size, fit_to_bounds};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Printable page and spooler command.
#[derive(Debug, Clone)]
pub struct PrintSettings {
    /// Printable area in pixels
    pub page: Size,
    /// Spooler command; PNG data is written to its stdin
    pub command: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            page: Size::new(816, 1056),
            command: "lp".to_string(),
        }
    }
}

/// Scales the image down (aspect preserved) so it fits on the page.
///
/// Images that already fit are returned unchanged.
pub fn fit_to_page(image: RgbaImage, page: Size) -> RgbaImage {
    let original = Size::new(image.width(), image.height());
    let target = fit_to_bounds(original, page);
    if target == original {
        return image;
    }

    log::debug!(
        "Scaling print image {}x{} -> {}x{}",
        original.width,
        original.height,
        target.width,
        target.height
    );
    imageops::resize(
        &image,
        target.width.max(1),
        target.height.max(1),
        FilterType::Triangle,
    )
}

/// Pipes PNG bytes into the spooler command.
pub fn send_to_printer(png_data: &[u8], command: &str) -> Result<(), ExportError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ExportError::PrintError("print command is empty".to_string()))?;

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExportError::PrintError(format!("failed to spawn '{}': {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(png_data) {
            Ok(()) => {}
            // The spooler quit early; its exit status says why
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("'{}' closed its input early", program);
            }
            Err(e) => {
                return Err(ExportError::PrintError(format!(
                    "failed to write to '{}': {}",
                    program, e
                )));
            }
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::PrintError(format!("failed to wait for '{}': {}", program, e)))?;

    if !output.status.success() {
        return Err(ExportError::PrintError(format!(
            "'{}' exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    log::info!("Sent {} bytes to '{}'", png_data.len(), program);
    Ok(())
}
