//! The frozen screen snapshot and the export cropper.

use super::types::CaptureError;
use crate::config::ImageFormat;
use crate::geometry::Rect;
use image::RgbaImage;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Immutable RGBA snapshot taken once per session.
///
/// Cloning is cheap; every clone shares the same pixels.
#[derive(Debug, Clone)]
pub struct CaptureImage {
    pixels: Arc<RgbaImage>,
}

impl CaptureImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Decodes PNG or BMP bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureError> {
        if bytes.is_empty() {
            return Err(CaptureError::ImageError("empty image data".into()));
        }
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// Reads and decodes an image file.
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copies the pixels under an export rectangle.
    ///
    /// Returns `None` for rectangles without area or reaching outside the
    /// snapshot.
    pub fn crop(&self, rect: Rect) -> Option<RgbaImage> {
        if rect.width <= 0 || rect.height <= 0 || !rect.fits_within(self.width(), self.height()) {
            log::debug!("Refusing crop {:?} on {}x{} snapshot", rect, self.width(), self.height());
            return None;
        }

        Some(
            image::imageops::crop_imm(
                &*self.pixels,
                rect.x as u32,
                rect.y as u32,
                rect.width as u32,
                rect.height as u32,
            )
            .to_image(),
        )
    }
}

/// Encodes an image as PNG or BMP bytes.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let codec = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    };

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, codec)?;
    Ok(buffer.into_inner())
}
