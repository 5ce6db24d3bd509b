//! Shared geometry utilities.

use kurbo::{BezPath, PathEl, Point, Rect, Vec2};

/// Below this length a vector has no usable direction.
pub const EPSILON: f64 = 1e-9;

/// Signed area of a closed polygon. Positive = CCW, negative = CW.
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].x * points[j].y - points[j].x * points[i].y
        })
        .sum::<f64>()
        / 2.0
}

/// The on-curve point an element ends at.
pub fn anchor(el: &PathEl) -> Option<Point> {
    match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            Some(p)
        }
        PathEl::ClosePath => None,
    }
}

/// Apply `f` to every point (anchor and controls) of an element.
pub fn map_points(el: PathEl, mut f: impl FnMut(Point) -> Point) -> PathEl {
    match el {
        PathEl::MoveTo(p) => PathEl::MoveTo(f(p)),
        PathEl::LineTo(p) => PathEl::LineTo(f(p)),
        PathEl::QuadTo(a, p) => PathEl::QuadTo(f(a), f(p)),
        PathEl::CurveTo(a, b, p) => PathEl::CurveTo(f(a), f(b), f(p)),
        PathEl::ClosePath => PathEl::ClosePath,
    }
}

/// Round every coordinate to the nearest font unit.
pub fn round_el(el: PathEl) -> PathEl {
    map_points(el, |p| p.round())
}

pub fn round_path(path: &BezPath) -> BezPath {
    BezPath::from_vec(path.elements().iter().map(|el| round_el(*el)).collect())
}

/// Bounding box of every point (anchors and controls) in `elements`.
pub fn control_bounds(elements: &[PathEl]) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    for el in elements {
        map_points(*el, |p| {
            bounds = Some(match bounds {
                Some(r) => r.union_pt(p),
                None => Rect::from_points(p, p),
            });
            p
        });
    }
    bounds
}

/// Distance from point P to line through A→B.
pub fn point_to_line_dist(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.hypot2();
    if len_sq < 1e-10 {
        return ap.hypot();
    }
    ab.cross(ap).abs() / len_sq.sqrt()
}

pub fn dist_sq(a: Point, b: Point) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

/// Unit vector, or `None` when `v` is degenerate.
pub fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len < EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Rotate a vector 90° counter-clockwise.
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Intersection of segments A0→A1 and B0→B1.
///
/// Returns the parameters `(s, u)` along A and B, both in [0, 1].
/// Parallel segments never intersect.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.cross(db);
    if denom.abs() < 1e-12 {
        return None;
    }
    let diff = b0 - a0;
    let s = diff.cross(db) / denom;
    let u = diff.cross(da) / denom;
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&u) {
        Some((s, u))
    } else {
        None
    }
}
