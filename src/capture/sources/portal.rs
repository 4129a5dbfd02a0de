use crate::capture::{portal, types::CaptureError};

use super::reader::read_portal_file;

/// Portal screenshot bytes, read off the Tokio runtime.
pub async fn capture_via_portal() -> Result<Vec<u8>, CaptureError> {
    let uri = portal::screenshot_uri().await?;

    tokio::task::spawn_blocking(move || read_portal_file(&uri))
        .await
        .map_err(|e| CaptureError::ImageError(format!("Portal reader task failed: {}", e)))?
}
