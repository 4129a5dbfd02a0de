//! Selection geometry: quadrant classification, rectangle normalization,
//! keyboard nudging and fit-to-page scaling.
//!
//! Everything here is pure. The selection is always described by two raw
//! points (`anchor`, `cursor`); rectangles are derived on demand and never
//! stored.

/// A point in snapshot pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamps the point into `[0, width] x [0, height]`.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        let max_x = width.min(i32::MAX as u32) as i32;
        let max_y = height.min(i32::MAX as u32) as i32;
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
///
/// Rectangles produced in [`NormalizeMode::Export`] always have positive
/// extents. Preview rectangles keep the sign of the drag and may have a
/// negative width or height; use [`Rect::canonical`] before drawing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the rectangle covers at least one pixel.
    pub fn has_area(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    /// Flips negative extents so the origin becomes the top-left corner.
    pub fn canonical(&self) -> Rect {
        let (x, width) = if self.width < 0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: i32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }

    /// Returns true if the rectangle lies entirely within `[0, width] x [0, height]`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let rect = self.canonical();
        rect.x >= 0
            && rect.y >= 0
            && (rect.x as i64 + rect.width as i64) <= width as i64
            && (rect.y as i64 + rect.height as i64) <= height as i64
    }
}

/// Where the second point of a drag lies relative to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragQuadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    /// The points share an x or y coordinate.
    Degenerate,
}

impl DragQuadrant {
    /// The quadrant reached by swapping the two points.
    pub fn opposite(self) -> Self {
        match self {
            DragQuadrant::UpperLeft => DragQuadrant::LowerRight,
            DragQuadrant::UpperRight => DragQuadrant::LowerLeft,
            DragQuadrant::LowerLeft => DragQuadrant::UpperRight,
            DragQuadrant::LowerRight => DragQuadrant::UpperLeft,
            DragQuadrant::Degenerate => DragQuadrant::Degenerate,
        }
    }

    fn rule(self) -> Option<&'static QuadrantRule> {
        QUADRANT_RULES
            .iter()
            .find(|(quadrant, _)| *quadrant == self)
            .map(|(_, rule)| rule)
    }
}

/// Classifies `second` relative to `first`.
///
/// Always call with the anchor first and the cursor second; swapping the
/// arguments flips every quadrant.
pub fn classify(first: Point, second: Point) -> DragQuadrant {
    use std::cmp::Ordering::{Greater, Less};

    match (first.x.cmp(&second.x), first.y.cmp(&second.y)) {
        (Greater, Greater) => DragQuadrant::UpperLeft,
        (Less, Greater) => DragQuadrant::UpperRight,
        (Greater, Less) => DragQuadrant::LowerLeft,
        (Less, Less) => DragQuadrant::LowerRight,
        _ => DragQuadrant::Degenerate,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    Anchor,
    Cursor,
}

impl Corner {
    fn pick(self, anchor: Point, cursor: Point) -> Point {
        match self {
            Corner::Anchor => anchor,
            Corner::Cursor => cursor,
        }
    }
}

/// Which raw point supplies each origin coordinate, and the sign that turns
/// `cursor - anchor` into a positive extent.
#[derive(Debug)]
struct QuadrantRule {
    origin_x: Corner,
    origin_y: Corner,
    sign_x: i32,
    sign_y: i32,
}

const QUADRANT_RULES: [(DragQuadrant, QuadrantRule); 4] = [
    (
        DragQuadrant::UpperLeft,
        QuadrantRule {
            origin_x: Corner::Cursor,
            origin_y: Corner::Cursor,
            sign_x: -1,
            sign_y: -1,
        },
    ),
    (
        DragQuadrant::UpperRight,
        QuadrantRule {
            origin_x: Corner::Anchor,
            origin_y: Corner::Cursor,
            sign_x: 1,
            sign_y: -1,
        },
    ),
    (
        DragQuadrant::LowerLeft,
        QuadrantRule {
            origin_x: Corner::Cursor,
            origin_y: Corner::Anchor,
            sign_x: -1,
            sign_y: 1,
        },
    ),
    (
        DragQuadrant::LowerRight,
        QuadrantRule {
            origin_x: Corner::Anchor,
            origin_y: Corner::Anchor,
            sign_x: 1,
            sign_y: 1,
        },
    ),
];

/// How [`normalize`] derives a rectangle from the raw points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Origin at the anchor, signed extents. Used for live repaint.
    Preview,
    /// True top-left origin, positive extents. Refused when degenerate.
    Export,
}

/// Derives the selection rectangle from the anchor and cursor points.
///
/// Preview mode never fails. Export mode returns `None` for degenerate
/// selections.
pub fn normalize(anchor: Point, cursor: Point, mode: NormalizeMode) -> Option<Rect> {
    match mode {
        NormalizeMode::Preview => Some(Rect::new(
            anchor.x,
            anchor.y,
            cursor.x - anchor.x,
            cursor.y - anchor.y,
        )),
        NormalizeMode::Export => {
            let rule = classify(anchor, cursor).rule()?;
            Some(Rect::new(
                rule.origin_x.pick(anchor, cursor).x,
                rule.origin_y.pick(anchor, cursor).y,
                rule.sign_x * (cursor.x - anchor.x),
                rule.sign_y * (cursor.y - anchor.y),
            ))
        }
    }
}

/// Scales `size` down uniformly so it fits in `max`; never scales up.
pub fn fit_to_bounds(size: Size, max: Size) -> Size {
    if size.width == 0 || size.height == 0 {
        return size;
    }

    let width_ratio = max.width as f64 / size.width as f64;
    let height_ratio = max.height as f64 / size.height as f64;
    let min_ratio = width_ratio.min(height_ratio);

    if min_ratio > 1.0 {
        return size;
    }

    Size::new(
        (size.width as f64 * min_ratio) as u32,
        (size.height as f64 * min_ratio) as u32,
    )
}

/// Arrow-key direction for nudging a drawn selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Low,
    High,
}

/// Axis, edge and step sign for each arrow key.
const NUDGE_RULES: [(NudgeDirection, Axis, Edge, i32); 4] = [
    (NudgeDirection::Up, Axis::Y, Edge::Low, -1),
    (NudgeDirection::Down, Axis::Y, Edge::High, 1),
    (NudgeDirection::Left, Axis::X, Edge::Low, -1),
    (NudgeDirection::Right, Axis::X, Edge::High, 1),
];

/// Moves the edge facing `direction` by `step` pixels.
///
/// The point that owns that edge on the axis (smallest coordinate for
/// Up/Left, largest for Down/Right) moves; on a tie the cursor moves. A
/// negative step pulls the edge back instead of pushing it out.
pub fn nudge(anchor: Point, cursor: Point, direction: NudgeDirection, step: i32) -> (Point, Point) {
    let Some(&(_, axis, edge, sign)) = NUDGE_RULES.iter().find(|rule| rule.0 == direction) else {
        return (anchor, cursor);
    };

    let coord = |p: Point| match axis {
        Axis::X => p.x,
        Axis::Y => p.y,
    };

    let anchor_owns_edge = match edge {
        Edge::Low => coord(anchor) < coord(cursor),
        Edge::High => coord(anchor) > coord(cursor),
    };

    let shift = |p: Point| match axis {
        Axis::X => Point::new(p.x + sign * step, p.y),
        Axis::Y => Point::new(p.x, p.y + sign * step),
    };

    if anchor_owns_edge {
        (shift(anchor), cursor)
    } else {
        (anchor, shift(cursor))
    }
}
