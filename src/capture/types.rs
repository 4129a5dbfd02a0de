//! Data types for snapshot acquisition.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::Rect;

/// Where the session snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// `grim`, optionally restricted to one output
    Grim { output: Option<String> },
    /// xdg-desktop-portal Screenshot
    Portal,
    /// Image file given on the command line
    File(PathBuf),
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Grim { output: Some(name) } => write!(f, "grim ({})", name),
            SnapshotSource::Grim { output: None } => write!(f, "grim"),
            SnapshotSource::Portal => write!(f, "xdg-desktop-portal"),
            SnapshotSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The output the overlay is mapped on, which is also the one captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenTarget {
    /// Connector name such as `DP-1`, passed to `grim -o`
    pub name: Option<String>,
    /// Logical placement of this output in the compositor layout
    pub region: Rect,
    /// Bounding box of every output in the layout
    pub layout: Rect,
}

impl ScreenTarget {
    /// Pixel rectangle of this output inside a whole-layout screenshot.
    ///
    /// Screenshots covering every output (the portal) are scaled uniformly
    /// from the layout, so the region maps by the same factor. Returns `None`
    /// when the output already spans the whole image.
    pub fn region_in_layout_image(&self, image_width: u32, image_height: u32) -> Option<Rect> {
        if self.region == self.layout || self.layout.width <= 0 || self.layout.height <= 0 {
            return None;
        }

        let scale_x = image_width as f64 / self.layout.width as f64;
        let scale_y = image_height as f64 / self.layout.height as f64;
        let x = ((self.region.x - self.layout.x) as f64 * scale_x).round() as i32;
        let y = ((self.region.y - self.layout.y) as f64 * scale_y).round() as i32;
        let width = (self.region.width as f64 * scale_x).round() as i32;
        let height = (self.region.height as f64 * scale_y).round() as i32;

        let rect = Rect::new(
            x.max(0),
            y.max(0),
            width.min(image_width as i32 - x.max(0)),
            height.min(image_height as i32 - y.max(0)),
        );
        (rect.width > 0 && rect.height > 0).then_some(rect)
    }
}

/// Errors that can occur while taking or decoding the snapshot.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Screenshot permission denied by user")]
    PermissionDenied,

    #[error("D-Bus communication error: {0}")]
    DBusError(#[from] zbus::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Screenshot tool failed: {0}")]
    ToolFailed(String),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("Portal returned invalid response: {0}")]
    InvalidResponse(String),
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::ImageError(err.to_string())
    }
}
