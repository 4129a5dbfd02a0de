//! Session snapshot acquisition.
//!
//! The screen is captured exactly once, before the overlay is shown, and kept
//! as an immutable [`CaptureImage`]. Every frame and every export reads from
//! that snapshot.

pub mod focus;
pub mod image;
pub mod portal;
pub mod types;

mod sources;

pub use self::image::{CaptureImage, encode};
pub use types::{CaptureError, ScreenTarget, SnapshotSource};

use std::path::Path;

/// Captures the target output and decodes it.
///
/// Without a target the whole layout is captured.
pub async fn capture_screen(
    target: Option<&ScreenTarget>,
) -> Result<(CaptureImage, SnapshotSource), CaptureError> {
    let (bytes, source) = sources::capture_screen_bytes(target).await?;
    let decoded = tokio::task::spawn_blocking(move || CaptureImage::decode(&bytes))
        .await
        .map_err(|e| CaptureError::ImageError(format!("Decode task failed: {}", e)))??;

    let snapshot = match (&source, target) {
        (SnapshotSource::Portal, Some(target)) => restrict_to_output(decoded, target),
        _ => decoded,
    };

    log::info!(
        "Captured {}x{} snapshot via {}",
        snapshot.width(),
        snapshot.height(),
        source
    );
    Ok((snapshot, source))
}

/// Loads a snapshot from an image file instead of the screen.
pub fn load_snapshot(path: &Path) -> Result<(CaptureImage, SnapshotSource), CaptureError> {
    let snapshot = CaptureImage::open(path)?;
    log::info!(
        "Loaded {}x{} snapshot from {}",
        snapshot.width(),
        snapshot.height(),
        path.display()
    );
    Ok((snapshot, SnapshotSource::File(path.to_path_buf())))
}

/// Cuts a whole-layout screenshot down to the target output.
pub fn restrict_to_output(layout_image: CaptureImage, target: &ScreenTarget) -> CaptureImage {
    let region = target.region_in_layout_image(layout_image.width(), layout_image.height());
    match region.and_then(|rect| layout_image.crop(rect)) {
        Some(pixels) => {
            log::debug!("Cropped layout screenshot to {:?} for {:?}", region, target.name);
            CaptureImage::new(pixels)
        }
        None => layout_image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use ::image::{Rgba, RgbaImage};

    #[test]
    fn layout_screenshot_is_cut_to_target_output() {
        let left = Rgba([255, 0, 0, 255]);
        let right = Rgba([0, 0, 255, 255]);
        let layout = CaptureImage::new(RgbaImage::from_fn(200, 50, |x, _| {
            if x < 100 { left } else { right }
        }));
        let target = ScreenTarget {
            name: Some("DP-2".into()),
            region: Rect::new(100, 0, 100, 50),
            layout: Rect::new(0, 0, 200, 50),
        };

        let snapshot = restrict_to_output(layout, &target);

        assert_eq!((snapshot.width(), snapshot.height()), (100, 50));
        assert_eq!(snapshot.pixels().get_pixel(0, 0), &right);
        assert_eq!(snapshot.pixels().get_pixel(99, 49), &right);
    }
}
