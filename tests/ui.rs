use cairo::{Context, ImageSurface};
use image::{Rgba, RgbaImage};
use leercopy::config::KeybindingsConfig;
use leercopy::draw::color::{BLACK, BLUE, CONTROL_GRAY};
use leercopy::draw::{
    BorderSpec, ClearRequest, OverlayScene, image_to_surface, paint_ops, plan_overlay, plan_view,
};
use leercopy::geometry::{Point, Rect};

const WIDTH: u32 = 100;
const HEIGHT: u32 = 80;

fn red_snapshot() -> ImageSurface {
    let image = RgbaImage::from_pixel(WIDTH, HEIGHT, Rgba([255, 0, 0, 255]));
    image_to_surface(&image).unwrap()
}

fn target() -> (ImageSurface, Context) {
    let surface =
        ImageSurface::create(cairo::Format::ARgb32, WIDTH as i32, HEIGHT as i32).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Native-endian ARGB word at (x, y).
fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn green(word: u32) -> u32 {
    (word >> 8) & 0xFF
}

fn scene(selection: Option<(Point, Point)>) -> OverlayScene {
    OverlayScene {
        width: WIDTH,
        height: HEIGHT,
        tint: CONTROL_GRAY.with_alpha(0.35),
        selection,
        border: BorderSpec::new(true, BLUE),
    }
}

#[test]
fn overlay_tints_backdrop_and_reveals_selection() {
    let snapshot = red_snapshot();
    let (mut surface, ctx) = target();

    let ops = plan_overlay(&scene(Some((Point::new(60, 60), Point::new(20, 20)))), None);
    paint_ops(&ctx, &snapshot, &ops).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 40, 40), 0xFFFF_0000, "selection is untinted");
    assert!(green(pixel(&mut surface, 5, 5)) > 0, "backdrop is tinted");
    assert_eq!(pixel(&mut surface, 17, 40), 0xFF00_00FF, "border stroked outside the selection");
}

#[test]
fn clear_request_paints_backdrop_only() {
    let snapshot = red_snapshot();
    let (mut surface, ctx) = target();

    let ops = plan_overlay(
        &scene(Some((Point::new(20, 20), Point::new(60, 60)))),
        Some(ClearRequest),
    );
    paint_ops(&ctx, &snapshot, &ops).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 40, 40), pixel(&mut surface, 5, 5));
    assert!(green(pixel(&mut surface, 40, 40)) > 0);
}

#[test]
fn view_centers_crop_on_black() {
    let snapshot = red_snapshot();
    let (mut surface, ctx) = target();

    paint_ops(&ctx, &snapshot, &plan_view(WIDTH, HEIGHT, Rect::new(0, 0, 20, 20))).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 50, 40), 0xFFFF_0000);
    assert_eq!(pixel(&mut surface, 2, 2), 0xFF00_0000);
}

#[test]
fn tips_panel_draws_text() {
    let lines = leercopy::ui::tip_lines(&KeybindingsConfig::default());
    let surface = ImageSurface::create(cairo::Format::ARgb32, 800, 480).unwrap();
    let ctx = Context::new(&surface).unwrap();

    leercopy::ui::render_tips(&ctx, &lines, BLACK, 16.0, 800);
    drop(ctx);

    let mut surface = surface;
    assert_ne!(pixel(&mut surface, 560, 100), 0, "panel background covers the tips area");
    assert_eq!(pixel(&mut surface, 10, 10), 0, "left side untouched");
}
