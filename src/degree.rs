//! Curve degree algebra: exact subdivision and one-step degree changes.
//!
//! Segments are `PathEl`s paired with the anchor they start from.
//! Promotions are shape-preserving; demotions are lossy. Every degree
//! change rounds its result to integer font units.

use kurbo::{BezPath, CubicBez, Line, ParamCurve, PathEl, Point, QuadBez};

use crate::geom::{anchor, round_el};

/// Polynomial degree of a drawing segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Degree {
    Line = 1,
    Quad = 2,
    Cubic = 3,
}

pub fn degree(el: &PathEl) -> Option<Degree> {
    match el {
        PathEl::LineTo(_) => Some(Degree::Line),
        PathEl::QuadTo(..) => Some(Degree::Quad),
        PathEl::CurveTo(..) => Some(Degree::Cubic),
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}

/// De Casteljau split at `t`.
///
/// The halves reproduce the segment on [0, t] and [t, 1] exactly; no
/// rounding is applied. `MoveTo`/`ClosePath` have nothing to split.
pub fn split_at(el: PathEl, start: Point, t: f64) -> Option<(PathEl, PathEl)> {
    match el {
        PathEl::LineTo(p) => {
            let mid = Line::new(start, p).eval(t);
            Some((PathEl::LineTo(mid), PathEl::LineTo(p)))
        }
        PathEl::QuadTo(a, p) => {
            let ab = start.lerp(a, t);
            let bc = a.lerp(p, t);
            let mid = ab.lerp(bc, t);
            Some((PathEl::QuadTo(ab, mid), PathEl::QuadTo(bc, p)))
        }
        PathEl::CurveTo(a, b, p) => {
            let (left, right) = subdivide(CubicBez::new(start, a, b, p), t);
            Some((
                PathEl::CurveTo(left.p1, left.p2, left.p3),
                PathEl::CurveTo(right.p1, right.p2, right.p3),
            ))
        }
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}

/// De Casteljau subdivision of a cubic at parameter t.
pub fn subdivide(c: CubicBez, t: f64) -> (CubicBez, CubicBez) {
    let ab = c.p0.lerp(c.p1, t);
    let bc = c.p1.lerp(c.p2, t);
    let cd = c.p2.lerp(c.p3, t);
    let abc = ab.lerp(bc, t);
    let bcd = bc.lerp(cd, t);
    let mid = abc.lerp(bcd, t);
    (
        CubicBez::new(c.p0, ab, abc, mid),
        CubicBez::new(mid, bcd, cd, c.p3),
    )
}

/// Exact quadratic → cubic control points.
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> (Point, Point) {
    (
        start + (control - start) * (2.0 / 3.0),
        end + (control - end) * (2.0 / 3.0),
    )
}

/// Least-squares single control point for a cubic.
pub fn cubic_to_quad(start: Point, c1: Point, c2: Point, end: Point) -> Point {
    let v = (c1.to_vec2() * 3.0 + c2.to_vec2() * 3.0 - start.to_vec2() - end.to_vec2()) / 4.0;
    v.to_point()
}

/// Raise a segment one degree. Cubics are returned unchanged.
pub fn promote(el: PathEl, start: Point) -> PathEl {
    let raised = match el {
        PathEl::LineTo(p) => PathEl::QuadTo(start.midpoint(p), p),
        PathEl::QuadTo(a, p) => {
            let (c1, c2) = quad_to_cubic(start, a, p);
            PathEl::CurveTo(c1, c2, p)
        }
        other => other,
    };
    round_el(raised)
}

/// Lower a segment one degree. Lines are returned unchanged.
pub fn demote(el: PathEl, start: Point) -> PathEl {
    let lowered = match el {
        PathEl::CurveTo(a, b, p) => PathEl::QuadTo(cubic_to_quad(start, a, b, p), p),
        PathEl::QuadTo(_, p) => PathEl::LineTo(p),
        other => other,
    };
    round_el(lowered)
}

/// Chain promotions or demotions until `el` has the `target` degree.
pub fn convert_to_degree(el: PathEl, start: Point, target: Degree) -> PathEl {
    let mut current = el;
    while let Some(d) = degree(&current) {
        current = match d.cmp(&target) {
            std::cmp::Ordering::Less => promote(current, start),
            std::cmp::Ordering::Greater => demote(current, start),
            std::cmp::Ordering::Equal => break,
        };
    }
    current
}

/// Convert every curve in a path to `target`, leaving lines alone.
///
/// With `Degree::Quad` the result is encodable by quadratic-only formats.
pub fn path_to_degree(path: &BezPath, target: Degree) -> BezPath {
    let mut output = BezPath::new();
    let mut current = Point::ZERO;
    for el in path.elements() {
        let converted = match el {
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => convert_to_degree(*el, current, target),
            other => *other,
        };
        if let Some(p) = anchor(el) {
            current = p;
        }
        output.push(converted);
    }
    output
}

/// Evaluate a drawing segment at `t`.
pub fn eval(el: &PathEl, start: Point, t: f64) -> Option<Point> {
    match *el {
        PathEl::LineTo(p) => Some(Line::new(start, p).eval(t)),
        PathEl::QuadTo(a, p) => Some(QuadBez::new(start, a, p).eval(t)),
        PathEl::CurveTo(a, b, p) => Some(CubicBez::new(start, a, b, p).eval(t)),
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}
