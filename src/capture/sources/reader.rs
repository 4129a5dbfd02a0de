use std::{fs, path::Path, path::PathBuf, thread, time::Duration};

use crate::capture::types::CaptureError;

/// How long to wait for the portal to finish writing its file.
const POLL_ATTEMPTS: u32 = 60;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Reads the screenshot a portal left at a `file://` URI, then deletes it.
pub fn read_portal_file(uri: &str) -> Result<Vec<u8>, CaptureError> {
    let path = uri_to_path(uri)?;
    let data = wait_for_contents(&path)?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());

    if let Err(e) = fs::remove_file(&path) {
        log::warn!("Failed to remove portal file {}: {}", path.display(), e);
    }

    Ok(data)
}

/// Decodes percent-encoding (spaces, non-ASCII names).
fn uri_to_path(uri: &str) -> Result<PathBuf, CaptureError> {
    let url = url::Url::parse(uri)
        .map_err(|e| CaptureError::InvalidResponse(format!("Invalid file URI '{}': {}", uri, e)))?;
    url.to_file_path()
        .map_err(|_| CaptureError::InvalidResponse(format!("Not a local file URI: {}", uri)))
}

/// Some portals return the URI before the file is flushed.
fn wait_for_contents(path: &Path) -> Result<Vec<u8>, CaptureError> {
    for attempt in 1..=POLL_ATTEMPTS {
        match fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => return Ok(bytes),
            Ok(_) => log::trace!("{} still empty ({}/{})", path.display(), attempt, POLL_ATTEMPTS),
            Err(e) => log::trace!("{} not ready ({}/{}): {}", path.display(), attempt, POLL_ATTEMPTS, e),
        }
        thread::sleep(POLL_INTERVAL);
    }

    Err(CaptureError::ImageError(format!(
        "Portal file {} still empty after {:?}",
        path.display(),
        POLL_INTERVAL * POLL_ATTEMPTS
    )))
}
