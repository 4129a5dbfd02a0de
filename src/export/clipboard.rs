//! Clipboard delivery.

use super::types::ExportError;
use std::io::Write;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, ServeRequests, Source};

const PNG_MIME: &str = "image/png";

/// Puts PNG bytes on the Wayland clipboard.
///
/// `wl-copy` is preferred because it keeps serving the data after we exit;
/// wl-clipboard-rs is the fallback when the command is missing.
pub fn copy_png(png_data: &[u8]) -> Result<(), ExportError> {
    let cmd_err = match copy_via_command(png_data) {
        Ok(()) => {
            log::info!("Copied {} bytes via wl-copy", png_data.len());
            return Ok(());
        }
        Err(e) => e,
    };

    log::warn!("wl-copy failed ({}), falling back to wl-clipboard-rs", cmd_err);
    copy_via_library(png_data).map_err(|lib_err| {
        ExportError::ClipboardError(format!(
            "wl-copy failed: {} ; wl-clipboard-rs failed: {}",
            cmd_err, lib_err
        ))
    })
}

fn copy_via_library(png_data: &[u8]) -> Result<(), ExportError> {
    let mut opts = Options::new();
    // One paste, then the serving process exits
    opts.serve_requests(ServeRequests::Only(1));
    opts.copy(
        Source::Bytes(png_data.into()),
        MimeType::Specific(PNG_MIME.to_string()),
    )
    .map_err(|e| ExportError::ClipboardError(format!("wl-clipboard-rs error: {}", e)))
}

fn copy_via_command(png_data: &[u8]) -> Result<(), ExportError> {
    let mut child = Command::new("wl-copy")
        .args(["--type", PNG_MIME])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExportError::ClipboardError(format!("Failed to spawn wl-copy: {}", e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(png_data)
            .map_err(|e| ExportError::ClipboardError(format!("Failed to write to wl-copy: {}", e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::ClipboardError(format!("Failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        return Err(ExportError::ClipboardError(format!(
            "wl-copy exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
