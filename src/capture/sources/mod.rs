use crate::capture::types::{CaptureError, ScreenTarget, SnapshotSource};

mod grim;
mod portal;
pub(crate) mod reader;

/// Raw screenshot bytes of the target output.
///
/// `grim` is tried first (fast, no dialog); the portal is the fallback for
/// compositors without wlr-screencopy. Portal screenshots always cover the
/// whole layout and are cropped by the caller.
pub async fn capture_screen_bytes(
    target: Option<&ScreenTarget>,
) -> Result<(Vec<u8>, SnapshotSource), CaptureError> {
    let output = target.and_then(|t| t.name.clone());
    match grim::capture_output(output.clone()).await {
        Ok(bytes) => Ok((bytes, SnapshotSource::Grim { output })),
        Err(e) => {
            log::warn!("Snapshot via grim failed: {}. Falling back to portal.", e);
            let bytes = portal::capture_via_portal().await?;
            Ok((bytes, SnapshotSource::Portal))
        }
    }
}
