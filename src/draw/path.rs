//! Owned vector path describing the selection outline.
//!
//! Cairo paths are tied to a context, so the selection is kept as a plain list
//! of segments that can be replayed onto any context, translated in place, and
//! measured for damage tracking.

use crate::util::{Point, Rect};

/// Control-point distance for approximating a quarter ellipse with one Bézier curve.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// A single drawing instruction of a [`SelectionPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    ClosePath,
}

impl PathSegment {
    fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(p.offset_by(dx, dy)),
            PathSegment::LineTo(p) => PathSegment::LineTo(p.offset_by(dx, dy)),
            PathSegment::CurveTo(c1, c2, end) => PathSegment::CurveTo(
                c1.offset_by(dx, dy),
                c2.offset_by(dx, dy),
                end.offset_by(dx, dy),
            ),
            PathSegment::ClosePath => PathSegment::ClosePath,
        }
    }
}

/// Closed vector outline of the current selection, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionPath {
    segments: Vec<PathSegment>,
}

impl SelectionPath {
    /// Creates an empty path (selects nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle starting at `(x, y)`.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::polygon(&[
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    /// Ellipse inscribed in the given bounding box, built from four Bézier quadrants.
    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        let rx = width / 2.0;
        let ry = height / 2.0;
        let cx = x + rx;
        let cy = y + ry;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        let segments = vec![
            PathSegment::MoveTo(Point::new(cx + rx, cy)),
            PathSegment::CurveTo(
                Point::new(cx + rx, cy + ky),
                Point::new(cx + kx, cy + ry),
                Point::new(cx, cy + ry),
            ),
            PathSegment::CurveTo(
                Point::new(cx - kx, cy + ry),
                Point::new(cx - rx, cy + ky),
                Point::new(cx - rx, cy),
            ),
            PathSegment::CurveTo(
                Point::new(cx - rx, cy - ky),
                Point::new(cx - kx, cy - ry),
                Point::new(cx, cy - ry),
            ),
            PathSegment::CurveTo(
                Point::new(cx + kx, cy - ry),
                Point::new(cx + rx, cy - ky),
                Point::new(cx + rx, cy),
            ),
            PathSegment::ClosePath,
        ];
        Self { segments }
    }

    /// Closed polygon through `points`. Fewer than three points yields an empty path.
    pub fn polygon(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new();
        };
        if rest.len() < 2 {
            return Self::new();
        }

        let mut segments = Vec::with_capacity(points.len() + 1);
        segments.push(PathSegment::MoveTo(*first));
        segments.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
        segments.push(PathSegment::ClosePath);
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Replays the path onto `ctx`, appending to whatever path the context already holds.
    pub fn append_to(&self, ctx: &cairo::Context) {
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
                PathSegment::CurveTo(c1, c2, end) => {
                    ctx.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y)
                }
                PathSegment::ClosePath => ctx.close_path(),
            }
        }
    }

    /// Moves every point of the path by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for segment in &mut self.segments {
            *segment = segment.translated(dx, dy);
        }
    }

    /// Returns a copy of the path moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut path = self.clone();
        path.translate(dx, dy);
        path
    }

    /// Bounds of all points, control points included, as `(min_x, min_y, max_x, max_y)`.
    ///
    /// Control points always enclose a Bézier curve, so the result covers the
    /// drawn outline even if it is not tight.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.segments.iter().flat_map(|segment| match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![p],
            PathSegment::CurveTo(c1, c2, end) => vec![c1, c2, end],
            PathSegment::ClosePath => Vec::new(),
        });

        let first = points.next()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(points.fold(init, |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        }))
    }

    /// Centre of the bounding box.
    pub fn center(&self) -> Option<Point> {
        self.bounds()
            .map(|(min_x, min_y, max_x, max_y)| Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
    }

    /// Integer rectangle that must be repainted when the outline (stroked with
    /// `stroke_width`) appears or disappears.
    pub fn damage_rect(&self, stroke_width: f64) -> Option<Rect> {
        let (min_x, min_y, max_x, max_y) = self.bounds()?;
        Rect::from_bounds(min_x, min_y, max_x, max_y, stroke_width / 2.0 + 1.0)
    }
}
