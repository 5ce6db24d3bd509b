//! Contour structure of a flat outline.
//!
//! A glyph outline is one `BezPath`; each `MoveTo` opens a contour that
//! runs up to its `ClosePath` (inclusive) or up to the next `MoveTo`.
//! Ranges are always derived from the path, never stored.

use std::ops::Range;

use kurbo::{BezPath, PathEl, Point};

use crate::geom::{anchor, polygon_area};

/// Endpoints closer than this to the contour start count as closing it.
const CLOSING_TOLERANCE: f64 = 1.0;

/// Fill/hole classification of a contour.
///
/// Negative signed area (clockwise in y-up space) is a fill; anything
/// else is a hole. Downstream encoders depend on this convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Fill,
    Hole,
}

/// Split a path's element list into contour ranges.
///
/// A trailing contour without `ClosePath` is still returned. Elements
/// before the first `MoveTo` belong to no contour.
pub fn contour_ranges(path: &BezPath) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;
    for (i, el) in path.elements().iter().enumerate() {
        match el {
            PathEl::MoveTo(_) => {
                if let Some(start) = open.take() {
                    ranges.push(start..i);
                }
                open = Some(i);
            }
            PathEl::ClosePath => {
                if let Some(start) = open.take() {
                    ranges.push(start..i + 1);
                }
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        ranges.push(start..path.elements().len());
    }
    ranges
}

pub fn contour_count(path: &BezPath) -> usize {
    contour_ranges(path).len()
}

/// Element range of one contour, if it exists.
pub fn contour_range(path: &BezPath, index: usize) -> Option<Range<usize>> {
    contour_ranges(path).into_iter().nth(index)
}

/// Whether a contour range ends with `ClosePath`.
pub fn is_closed(elements: &[PathEl]) -> bool {
    matches!(elements.last(), Some(PathEl::ClosePath))
}

/// On-curve points of a contour, in drawing order.
pub fn anchors(elements: &[PathEl]) -> Vec<Point> {
    elements.iter().filter_map(anchor).collect()
}

/// Signed area of one contour's anchor polygon (controls ignored).
pub fn signed_area(path: &BezPath, index: usize) -> f64 {
    match contour_range(path, index) {
        Some(range) => polygon_area(&anchors(&path.elements()[range])),
        None => 0.0,
    }
}

/// Fill/hole classification. Degenerate or missing contours are fills.
pub fn winding(path: &BezPath, index: usize) -> Winding {
    let Some(range) = contour_range(path, index) else {
        return Winding::Fill;
    };
    let points = anchors(&path.elements()[range]);
    if points.len() < 3 || polygon_area(&points) < 0.0 {
        Winding::Fill
    } else {
        Winding::Hole
    }
}

pub fn is_clockwise(path: &BezPath, index: usize) -> bool {
    winding(path, index) == Winding::Fill
}

/// Reverse the drawing direction of one contour.
///
/// Curves keep their shape: control points are swapped and each segment
/// is redrawn toward its previous anchor. Out-of-range is a no-op.
pub fn reverse_contour(path: &BezPath, index: usize) -> BezPath {
    let Some(range) = contour_range(path, index) else {
        return path.clone();
    };
    let reversed = reverse_elements(&path.elements()[range.clone()]);
    splice(path, range, reversed)
}

/// Reverse a single contour's elements.
pub fn reverse_elements(elements: &[PathEl]) -> Vec<PathEl> {
    let mut first = Point::ZERO;
    let mut segments: Vec<(Point, Seg)> = Vec::new();
    let mut closed = false;

    for el in elements {
        match *el {
            PathEl::MoveTo(p) => first = p,
            PathEl::LineTo(p) => segments.push((p, Seg::Line)),
            PathEl::CurveTo(a, b, p) => segments.push((p, Seg::Curve(a, b))),
            PathEl::QuadTo(a, p) => segments.push((p, Seg::Quad(a))),
            PathEl::ClosePath => closed = true,
        }
    }

    let mut output = vec![PathEl::MoveTo(segments.last().map_or(first, |s| s.0))];
    for i in (0..segments.len()).rev() {
        let target = if i == 0 { first } else { segments[i - 1].0 };
        output.push(match segments[i].1 {
            Seg::Line => PathEl::LineTo(target),
            Seg::Curve(a, b) => PathEl::CurveTo(b, a, target),
            Seg::Quad(a) => PathEl::QuadTo(a, target),
        });
    }
    if closed {
        output.push(PathEl::ClosePath);
    }
    output
}

#[derive(Clone, Copy)]
enum Seg {
    Line,
    Curve(Point, Point),
    Quad(Point),
}

/// Ensure a contour has fill winding. Idempotent.
pub fn make_fill(path: &BezPath, index: usize) -> BezPath {
    set_winding(path, index, Winding::Fill)
}

/// Ensure a contour has hole winding. Idempotent.
pub fn make_cutout(path: &BezPath, index: usize) -> BezPath {
    set_winding(path, index, Winding::Hole)
}

fn set_winding(path: &BezPath, index: usize, target: Winding) -> BezPath {
    if index >= contour_count(path) || winding(path, index) == target {
        return path.clone();
    }
    reverse_contour(path, index)
}

/// Remove the listed contours; unknown indices are ignored.
pub fn remove_contours(path: &BezPath, indices: &[usize]) -> BezPath {
    let mut output = BezPath::new();
    for (i, range) in contour_ranges(path).into_iter().enumerate() {
        if !indices.contains(&i) {
            for el in &path.elements()[range] {
                output.push(*el);
            }
        }
    }
    output
}

/// One BezPath per contour.
pub fn split_contours(path: &BezPath) -> Vec<BezPath> {
    contour_ranges(path)
        .into_iter()
        .map(|range| BezPath::from_vec(path.elements()[range].to_vec()))
        .collect()
}

/// Concatenate per-contour paths back into one outline.
pub fn join_contours(contours: &[BezPath]) -> BezPath {
    BezPath::from_vec(
        contours
            .iter()
            .flat_map(|c| c.elements().iter().copied())
            .collect(),
    )
}

/// Replace `range` of the path's elements with `replacement`.
pub(crate) fn splice(path: &BezPath, range: Range<usize>, replacement: Vec<PathEl>) -> BezPath {
    let mut elements = path.elements().to_vec();
    elements.splice(range, replacement);
    BezPath::from_vec(elements)
}

/// Drop redundant points.
///
/// Two passes: closing `LineTo`s that return to the contour start (the
/// `ClosePath` already draws that edge), then `LineTo`/`MoveTo` elements
/// that repeat the immediately preceding anchor.
pub fn remove_duplicate_points(path: &BezPath) -> BezPath {
    let mut pass1: Vec<PathEl> = Vec::with_capacity(path.elements().len());
    for range in contour_ranges(path) {
        let elements = &path.elements()[range];
        let mut kept = elements.to_vec();
        if let [PathEl::MoveTo(start), .., PathEl::LineTo(end), PathEl::ClosePath] = elements {
            if (*end - *start).hypot() <= CLOSING_TOLERANCE {
                kept.remove(kept.len() - 2);
            }
        }
        pass1.extend(kept);
    }

    let mut output = BezPath::new();
    let mut previous: Option<Point> = None;
    for el in pass1 {
        match el {
            PathEl::LineTo(p) | PathEl::MoveTo(p) if previous == Some(p) => continue,
            PathEl::ClosePath => previous = None,
            _ => previous = anchor(&el),
        }
        output.push(el);
    }
    output
}
