//! Outline normals for anchors and control points.
//!
//! A [`NormalField`] is computed from one path state and carries a copy
//! of that path, so it can never be applied to geometry it was not
//! computed from. Recompute after any edit that moves points.
//!
//! Normals are the local tangent rotated 90° counter-clockwise. On a
//! fill contour (clockwise in y-up space) that points away from the ink;
//! on a hole it points into the counter, which is also away from the ink.

use kurbo::{BezPath, PathEl, Point, Vec2};

use crate::contour::{contour_ranges, is_closed};
use crate::geom::{anchor, dist_sq, perp, unit};

/// Anchors closer than this (squared) are treated as the same point.
const SAME_POINT_SQ: f64 = 1e-12;

/// Per-element normals for one path state.
#[derive(Debug, Clone)]
pub struct NormalField {
    path: BezPath,
    anchors: Vec<Option<Vec2>>,
    controls: Vec<[Option<Vec2>; 2]>,
    sides: Vec<Option<(Vec2, Vec2)>>,
}

impl NormalField {
    pub fn compute(path: &BezPath) -> Self {
        let elements = path.elements();
        let n = elements.len();
        let mut field = NormalField {
            path: path.clone(),
            anchors: vec![None; n],
            controls: vec![[None; 2]; n],
            sides: vec![None; n],
        };
        for range in contour_ranges(path) {
            let closed = is_closed(&elements[range.clone()]);
            let indices: Vec<usize> = range.filter(|&i| anchor(&elements[i]).is_some()).collect();
            field.fill_contour(elements, &indices, closed);
        }
        field
    }

    /// The path this field was computed from.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn is_valid_for(&self, path: &BezPath) -> bool {
        self.path.elements() == path.elements()
    }

    /// Normal at the anchor of element `index`.
    pub fn anchor(&self, index: usize) -> Option<Vec2> {
        self.anchors.get(index).copied().flatten()
    }

    /// Normal at control point `which` (0 or 1) of element `index`.
    pub fn control(&self, index: usize, which: usize) -> Option<Vec2> {
        self.controls
            .get(index)
            .and_then(|c| c.get(which))
            .copied()
            .flatten()
    }

    /// Normals of the incoming and outgoing sides at an anchor.
    ///
    /// A degenerate side borrows the other one, so at the ends of open
    /// contours both sides are equal.
    pub fn sides(&self, index: usize) -> Option<(Vec2, Vec2)> {
        self.sides.get(index).copied().flatten()
    }

    fn fill_contour(&mut self, elements: &[PathEl], indices: &[usize], closed: bool) {
        let n = indices.len();
        if n == 0 {
            return;
        }
        let point = |k: usize| anchor(&elements[indices[k]]).unwrap_or(Point::ZERO);
        let start = point(0);
        // An explicit closing segment lands back on the start point.
        let explicit_close = closed && n > 1 && dist_sq(point(n - 1), start) < SAME_POINT_SQ;

        for k in 0..n {
            let p = point(k);
            let incoming = if k > 0 {
                arrival(&elements[indices[k]], point(k - 1))
            } else if explicit_close {
                arrival(&elements[indices[n - 1]], point(n.saturating_sub(2)))
            } else if closed {
                unit(p - point(n - 1))
            } else {
                None
            };
            let outgoing = if k + 1 < n {
                departure(&elements[indices[k + 1]], p)
            } else if explicit_close {
                departure(&elements[indices[1]], p)
            } else if closed {
                unit(start - p)
            } else {
                None
            };
            self.anchors[indices[k]] = blend(incoming, outgoing).map(perp);
            self.sides[indices[k]] = match (incoming, outgoing) {
                (Some(a), Some(b)) => Some((perp(a), perp(b))),
                (Some(a), None) | (None, Some(a)) => Some((perp(a), perp(a))),
                (None, None) => None,
            };
        }

        for k in 1..n {
            let index = indices[k];
            let from = point(k - 1);
            let from_normal = self.anchors[indices[k - 1]];
            let own_normal = self.anchors[index];
            self.controls[index] = match elements[index] {
                PathEl::CurveTo(a, b, p) => [
                    unit(a - from).map(perp).or(from_normal),
                    unit(p - b).map(perp).or(own_normal),
                ],
                PathEl::QuadTo(a, p) => [
                    blend(unit(a - from), unit(p - a)).map(perp).or(own_normal),
                    None,
                ],
                _ => [None, None],
            };
        }
    }
}

/// Unit tangent arriving at the end of `el`, drawn from `from`.
fn arrival(el: &PathEl, from: Point) -> Option<Vec2> {
    match *el {
        PathEl::CurveTo(_, b, p) => unit(p - b).or_else(|| unit(p - from)),
        PathEl::QuadTo(a, p) => unit(p - a).or_else(|| unit(p - from)),
        PathEl::LineTo(p) | PathEl::MoveTo(p) => unit(p - from),
        PathEl::ClosePath => None,
    }
}

/// Unit tangent leaving `from` along `el`.
fn departure(el: &PathEl, from: Point) -> Option<Vec2> {
    match *el {
        PathEl::CurveTo(a, _, p) => unit(a - from).or_else(|| unit(p - from)),
        PathEl::QuadTo(a, p) => unit(a - from).or_else(|| unit(p - from)),
        PathEl::LineTo(p) | PathEl::MoveTo(p) => unit(p - from),
        PathEl::ClosePath => None,
    }
}

/// Average two unit tangents; a cusp falls back to the incoming one.
fn blend(incoming: Option<Vec2>, outgoing: Option<Vec2>) -> Option<Vec2> {
    match (incoming, outgoing) {
        (Some(a), Some(b)) => unit(a + b).or(Some(a)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
