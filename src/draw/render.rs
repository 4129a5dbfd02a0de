//! Cairo painter for planned overlay frames.

use super::frame::DrawOp;
use anyhow::{Context as _, Result};
use cairo::{Context, Format, ImageSurface};
use image::RgbaImage;

/// Copies an RGBA image into a cairo ARGB32 surface.
///
/// Cairo stores premultiplied alpha in native-endian 32-bit words, so every
/// pixel is converted rather than copied.
pub fn image_to_surface(image: &RgbaImage) -> Result<ImageSurface> {
    let width = i32::try_from(image.width()).context("Snapshot too wide for cairo")?;
    let height = i32::try_from(image.height()).context("Snapshot too tall for cairo")?;

    let mut surface = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|e| anyhow::anyhow!("Failed to create Cairo surface: {}", e))?;
    let stride = surface.stride() as usize;

    {
        let mut data = surface
            .data()
            .map_err(|e| anyhow::anyhow!("Failed to borrow surface data: {}", e))?;

        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiply = |c: u8| (c as u32 * a as u32 + 127) / 255;
            let word =
                (a as u32) << 24 | premultiply(r) << 16 | premultiply(g) << 8 | premultiply(b);

            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&word.to_ne_bytes());
        }
    }

    surface.mark_dirty();
    Ok(surface)
}

/// Executes planned draw operations.
///
/// `snapshot` is the source of every [`DrawOp::Blit`]; coordinates are in
/// snapshot pixels, so callers scale the context when the output buffer has
/// a different size.
pub fn paint_ops(ctx: &Context, snapshot: &ImageSurface, ops: &[DrawOp]) -> Result<(), cairo::Error> {
    for op in ops {
        match *op {
            DrawOp::Blit { src, dest } => {
                ctx.save()?;
                ctx.rectangle(
                    dest.x as f64,
                    dest.y as f64,
                    src.width as f64,
                    src.height as f64,
                );
                ctx.clip();
                ctx.set_source_surface(snapshot, (dest.x - src.x) as f64, (dest.y - src.y) as f64)?;
                ctx.paint()?;
                ctx.restore()?;
            }
            DrawOp::Fill(color) => {
                color.set_source(ctx);
                ctx.paint()?;
            }
            DrawOp::StrokeRect { rect, color, width } => {
                color.set_source(ctx);
                ctx.set_line_width(width);
                ctx.rectangle(
                    rect.x as f64,
                    rect.y as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
                ctx.stroke()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn image_to_surface_premultiplies() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

        let mut surface = image_to_surface(&image).unwrap();
        assert_eq!(surface.width(), 2);
        let data = surface.data().unwrap();

        let opaque = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        let clear = u32::from_ne_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(opaque, 0xFFFF_0000);
        assert_eq!(clear, 0);
    }
}
