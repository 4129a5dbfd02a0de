//! Overlay frame planning.
//!
//! A frame is described as a flat list of [`DrawOp`]s computed from the raw
//! selection points. Planning is pure; [`super::render::paint_ops`] executes
//! the list against the snapshot surface.

use super::color::{BLACK, Color, RED};
use crate::geometry::{NormalizeMode, Point, Rect, normalize};

/// Selection border appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSpec {
    pub enabled: bool,
    pub color: Color,
    /// Stroke width in pixels
    pub width: f64,
    /// Gap between the selection and the border, in pixels
    pub inset: i32,
}

impl BorderSpec {
    pub const DEFAULT_WIDTH: f64 = 4.0;
    pub const DEFAULT_INSET: i32 = 2;

    pub fn new(enabled: bool, color: Color) -> Self {
        Self {
            enabled,
            color,
            width: Self::DEFAULT_WIDTH,
            inset: Self::DEFAULT_INSET,
        }
    }

    /// Rectangle the border is stroked along for an export rectangle.
    pub fn frame_rect(&self, export: Rect) -> Rect {
        export.inflate(self.inset)
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::new(true, RED)
    }
}

/// One-shot request to repaint only the backdrop.
///
/// Queued by the clear action and consumed by the next [`plan_overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearRequest;

/// Primitive draw operation executed by the cairo painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Copy `src` from the snapshot so its top-left lands on `dest`.
    Blit { src: Rect, dest: Point },
    /// Paint the whole surface with a (usually translucent) color.
    Fill(Color),
    /// Stroke a rectangle outline.
    StrokeRect { rect: Rect, color: Color, width: f64 },
}

/// Everything the planner needs to describe one overlay frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayScene {
    pub width: u32,
    pub height: u32,
    /// Background color with the configured opacity already applied
    pub tint: Color,
    /// Raw `(anchor, cursor)` points while a selection is visible
    pub selection: Option<(Point, Point)>,
    pub border: BorderSpec,
}

impl OverlayScene {
    fn full_rect(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.width.min(i32::MAX as u32) as i32,
            self.height.min(i32::MAX as u32) as i32,
        )
    }
}

/// Plans the overlay: tinted backdrop, untinted selection, then the border.
///
/// With a [`ClearRequest`] only the backdrop is emitted. Degenerate
/// selections get neither a reveal nor a border.
pub fn plan_overlay(scene: &OverlayScene, clear: Option<ClearRequest>) -> Vec<DrawOp> {
    let mut ops = vec![
        DrawOp::Blit {
            src: scene.full_rect(),
            dest: Point::ORIGIN,
        },
        DrawOp::Fill(scene.tint),
    ];

    if clear.is_some() {
        return ops;
    }

    let Some((anchor, cursor)) = scene.selection else {
        return ops;
    };

    let preview = normalize(anchor, cursor, NormalizeMode::Preview).filter(Rect::has_area);
    if let Some(preview) = preview {
        let visible = preview.canonical();
        ops.push(DrawOp::Blit {
            src: visible,
            dest: Point::new(visible.x, visible.y),
        });
    }

    let bordered = normalize(anchor, cursor, NormalizeMode::Export).filter(|_| scene.border.enabled);
    if let Some(export) = bordered {
        ops.push(DrawOp::StrokeRect {
            rect: scene.border.frame_rect(export),
            color: scene.border.color,
            width: scene.border.width,
        });
    }

    ops
}

/// Plans the view popup: the selection centered on a black backdrop.
pub fn plan_view(width: u32, height: u32, selection: Rect) -> Vec<DrawOp> {
    let screen_w = width.min(i32::MAX as u32) as i32;
    let screen_h = height.min(i32::MAX as u32) as i32;

    let src = Rect::new(
        selection.x,
        selection.y,
        selection.width.min(screen_w),
        selection.height.min(screen_h),
    );
    let dest = Point::new((screen_w - src.width) / 2, (screen_h - src.height) / 2);

    vec![DrawOp::Fill(BLACK), DrawOp::Blit { src, dest }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(selection: Option<(Point, Point)>) -> OverlayScene {
        OverlayScene {
            width: 1920,
            height: 1080,
            tint: Color::new(0.9, 0.9, 0.9, 0.35),
            selection,
            border: BorderSpec::default(),
        }
    }

    #[test]
    fn idle_frame_is_backdrop_only() {
        let ops = plan_overlay(&scene(None), None);
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[0],
            DrawOp::Blit {
                src: Rect::new(0, 0, 1920, 1080),
                dest: Point::ORIGIN
            }
        );
        assert!(matches!(ops[1], DrawOp::Fill(c) if c.a == 0.35));
    }

    #[test]
    fn selection_reveals_canonical_rect_and_border() {
        let ops = plan_overlay(
            &scene(Some((Point::new(100, 100), Point::new(50, 40)))),
            None,
        );
        assert_eq!(ops.len(), 4);
        assert_eq!(
            ops[2],
            DrawOp::Blit {
                src: Rect::new(50, 40, 50, 60),
                dest: Point::new(50, 40)
            }
        );
        assert_eq!(
            ops[3],
            DrawOp::StrokeRect {
                rect: Rect::new(48, 38, 54, 64),
                color: RED,
                width: 4.0
            }
        );
    }

    #[test]
    fn clear_request_suppresses_selection() {
        let selection = Some((Point::new(10, 10), Point::new(200, 200)));
        let ops = plan_overlay(&scene(selection), Some(ClearRequest));
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn degenerate_selection_draws_no_border() {
        let ops = plan_overlay(&scene(Some((Point::new(10, 10), Point::new(10, 90)))), None);
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn disabled_border_is_skipped() {
        let mut s = scene(Some((Point::new(10, 10), Point::new(90, 90))));
        s.border.enabled = false;
        let ops = plan_overlay(&s, None);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::StrokeRect { .. })));
    }

    #[test]
    fn planning_is_idempotent() {
        let s = scene(Some((Point::new(300, 20), Point::new(120, 400))));
        assert_eq!(plan_overlay(&s, None), plan_overlay(&s, None));
    }

    #[test]
    fn view_centers_selection() {
        let ops = plan_view(1920, 1080, Rect::new(100, 100, 200, 80));
        assert_eq!(
            ops[1],
            DrawOp::Blit {
                src: Rect::new(100, 100, 200, 80),
                dest: Point::new(860, 500)
            }
        );
    }
}
