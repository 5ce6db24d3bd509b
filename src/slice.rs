//! Cutting contours in two along a straight line.

use kurbo::{BezPath, PathEl, Point};

use crate::contour::{contour_ranges, is_closed, remove_duplicate_points};
use crate::degree::{eval, split_at};
use crate::geom::{anchor, round_path, segment_intersection};

/// Polyline steps used to find a line crossing a curve.
const CURVE_STEPS: usize = 32;
/// Edge parameters this close to 0 or 1 are treated as the vertex.
const VERTEX_EPSILON: f64 = 1e-9;

/// A crossing between the cutting line and one contour edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Contour index within the path.
    pub contour: usize,
    /// Edge index within the contour; the implicit closing edge of a
    /// closed contour comes last.
    pub edge: usize,
    /// Parameter along the edge.
    pub t: f64,
    /// Parameter along the cutting line, 0 at its first point.
    pub u: f64,
    pub point: Point,
}

/// Drawing edges of one contour as (start, element) pairs.
///
/// A closed contour whose last anchor is not its start gets an explicit
/// closing line.
fn edges(elements: &[PathEl]) -> Vec<(Point, PathEl)> {
    let mut edges = Vec::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    for el in elements {
        match *el {
            PathEl::MoveTo(p) => {
                start = p;
                current = p;
            }
            PathEl::ClosePath => {
                if current != start {
                    edges.push((current, PathEl::LineTo(start)));
                }
            }
            other => {
                edges.push((current, other));
                if let Some(p) = anchor(&other) {
                    current = p;
                }
            }
        }
    }
    edges
}

/// Where the cut crosses one edge, as (t along edge, u along cut).
fn cross_edge(from: Point, el: &PathEl, line: (Point, Point)) -> Option<(f64, f64)> {
    match *el {
        PathEl::LineTo(p) => {
            segment_intersection(from, p, line.0, line.1).filter(|(t, _)| *t < 1.0)
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
            let mut previous = from;
            for k in 0..CURVE_STEPS {
                let next = eval(el, from, (k + 1) as f64 / CURVE_STEPS as f64)?;
                if let Some((s, u)) = segment_intersection(previous, next, line.0, line.1) {
                    if k + 1 < CURVE_STEPS || s < 1.0 {
                        return Some(((k as f64 + s) / CURVE_STEPS as f64, u));
                    }
                }
                previous = next;
            }
            None
        }
        PathEl::MoveTo(_) | PathEl::ClosePath => None,
    }
}

/// Every crossing of `line` with the path, ordered along the line.
pub fn intersections(path: &BezPath, line: (Point, Point)) -> Vec<Intersection> {
    let mut hits = Vec::new();
    for (contour, range) in contour_ranges(path).into_iter().enumerate() {
        for (edge, (from, el)) in edges(&path.elements()[range]).into_iter().enumerate() {
            if let Some((t, u)) = cross_edge(from, &el, line) {
                let point = eval(&el, from, t).unwrap_or(from);
                hits.push(Intersection { contour, edge, t, u, point });
            }
        }
    }
    hits.sort_by(|a, b| a.u.total_cmp(&b.u));
    hits
}

/// Split every closed contour the line crosses exactly twice.
///
/// Each such contour is replaced by two closed contours that share the
/// cut as an edge. Other contours pass through unchanged. Split contours
/// are rounded to font units.
pub fn slice(path: &BezPath, line: (Point, Point)) -> BezPath {
    let hits = intersections(path, line);
    let mut output = BezPath::new();
    for (index, range) in contour_ranges(path).into_iter().enumerate() {
        let elements = &path.elements()[range];
        let mine: Vec<&Intersection> = hits.iter().filter(|h| h.contour == index).collect();
        let halves = match mine.as_slice() {
            [a, b] if is_closed(elements) => bisect(elements, a, b),
            _ => None,
        };
        match halves {
            Some((first, second)) => {
                log::debug!("slice: contour {} split in two", index);
                for half in [first, second] {
                    for el in round_path(&remove_duplicate_points(&half)).elements() {
                        output.push(*el);
                    }
                }
            }
            None => {
                for el in elements {
                    output.push(*el);
                }
            }
        }
    }
    output
}

/// Cut one closed contour at two crossings.
fn bisect(elements: &[PathEl], a: &Intersection, b: &Intersection) -> Option<(BezPath, BezPath)> {
    let (a, b) = if (a.edge, a.t) <= (b.edge, b.t) { (a, b) } else { (b, a) };

    // Flatten edges into pieces, splitting at each crossing; remember
    // which pieces end at a crossing. A crossing on a vertex marks the
    // piece ending there instead of splitting off an empty one. `None`
    // stands for the contour's last piece.
    let mut pieces: Vec<PathEl> = Vec::new();
    let mut cut_ends: Vec<Option<usize>> = Vec::new();
    for (k, (from, el)) in edges(elements).into_iter().enumerate() {
        let ts: Vec<f64> = [a, b].iter().filter(|h| h.edge == k).map(|h| h.t).collect();
        let mut rest = Some((el, from));
        let mut done = 0.0;
        for t in ts {
            let Some((el, from)) = rest else {
                break;
            };
            let local = (t - done) / (1.0 - done);
            if local <= VERTEX_EPSILON {
                cut_ends.push(pieces.len().checked_sub(1));
            } else if local >= 1.0 - VERTEX_EPSILON {
                pieces.push(el);
                cut_ends.push(Some(pieces.len() - 1));
                rest = None;
            } else {
                let (left, right) = split_at(el, from, local)?;
                pieces.push(left);
                cut_ends.push(Some(pieces.len() - 1));
                rest = Some((right, anchor(&left)?));
                done = t;
            }
        }
        pieces.extend(rest.map(|(el, _)| el));
    }
    let n = pieces.len();
    let ends: Vec<usize> = cut_ends
        .iter()
        .map(|end| end.unwrap_or(n.saturating_sub(1)))
        .collect();
    let &[ia, ib] = ends.as_slice() else {
        return None;
    };
    if ia == ib {
        return None;
    }
    let point_a = anchor(&pieces[ia])?;
    let point_b = anchor(&pieces[ib])?;

    let walk = |from: Point, first: usize, last: usize| -> BezPath {
        let mut half = BezPath::new();
        half.move_to(from);
        let mut k = first;
        while k != last {
            k = (k + 1) % n;
            half.push(pieces[k]);
        }
        half.close_path();
        half
    };
    Some((walk(point_a, ia, ib), walk(point_b, ib, ia)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{contour_count, signed_area};

    fn rectangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((100.0, 100.0));
        path.line_to((0.0, 100.0));
        path.close_path();
        path
    }

    const CUT: (Point, Point) = (Point::new(50.0, -10.0), Point::new(50.0, 110.0));

    #[test]
    fn crossings_are_ordered_along_the_cut() {
        let hits = intersections(&rectangle(), CUT);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point, Point::new(50.0, 0.0));
        assert_eq!(hits[1].point, Point::new(50.0, 100.0));
        assert!(hits[0].u < hits[1].u);
    }

    #[test]
    fn rectangle_splits_into_two_halves() {
        let out = slice(&rectangle(), CUT);
        assert_eq!(contour_count(&out), 2);
        assert!((signed_area(&out, 0).abs() - 5000.0).abs() < 1e-9);
        assert!((signed_area(&out, 1).abs() - 5000.0).abs() < 1e-9);
        for range in contour_ranges(&out) {
            assert!(is_closed(&out.elements()[range]));
        }
    }

    #[test]
    fn missing_or_single_crossings_leave_the_path() {
        let miss = (Point::new(500.0, -10.0), Point::new(500.0, 110.0));
        assert_eq!(slice(&rectangle(), miss).elements(), rectangle().elements());
        let graze = (Point::new(50.0, -10.0), Point::new(50.0, 50.0));
        assert_eq!(slice(&rectangle(), graze).elements(), rectangle().elements());
    }

    #[test]
    fn curved_edges_are_split_exactly() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 100.0), (200.0, 100.0), (200.0, 0.0));
        path.close_path();
        let out = slice(&path, (Point::new(100.0, -10.0), Point::new(100.0, 200.0)));
        assert_eq!(contour_count(&out), 2);
        assert!(out
            .elements()
            .iter()
            .any(|el| anchor(el) == Some(Point::new(100.0, 75.0))));
    }

    #[test]
    fn open_contours_are_not_cut() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((100.0, 100.0));
        path.line_to((0.0, 100.0));
        assert_eq!(slice(&path, CUT).elements(), path.elements());
    }

    #[test]
    fn cut_through_a_curve_start_leaves_no_empty_curve() {
        // The cut passes exactly through both ends of the curve.
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 100.0));
        path.line_to((50.0, 100.0));
        path.curve_to((100.0, 100.0), (100.0, 0.0), (50.0, 0.0));
        path.close_path();
        let out = slice(&path, CUT);
        assert_eq!(contour_count(&out), 2);

        let mut current = Point::ZERO;
        for el in out.elements() {
            if let PathEl::CurveTo(a, b, p) = *el {
                assert!(
                    !(a == current && b == current && p == current),
                    "empty curve at {current:?}"
                );
            }
            if let Some(p) = anchor(el) {
                current = p;
            }
        }
        let curves = out
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 1);
        let areas: Vec<f64> = (0..2).map(|i| signed_area(&out, i).abs()).collect();
        assert!(areas.iter().any(|a| (a - 5000.0).abs() < 1e-9));
    }

    #[test]
    fn four_crossings_leave_the_contour_whole() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 100.0));
        path.line_to((30.0, 100.0));
        path.line_to((30.0, 30.0));
        path.line_to((70.0, 30.0));
        path.line_to((70.0, 100.0));
        path.line_to((100.0, 100.0));
        path.line_to((100.0, 0.0));
        path.close_path();
        let across = (Point::new(-10.0, 50.0), Point::new(110.0, 50.0));
        assert_eq!(intersections(&path, across).len(), 4);
        assert_eq!(slice(&path, across).elements(), path.elements());
    }

    #[test]
    fn every_crossed_contour_is_split() {
        let mut path = rectangle();
        path.move_to((0.0, 200.0));
        path.line_to((100.0, 200.0));
        path.line_to((100.0, 300.0));
        path.line_to((0.0, 300.0));
        path.close_path();
        let tall_cut = (Point::new(50.0, -10.0), Point::new(50.0, 310.0));
        let out = slice(&path, tall_cut);
        assert_eq!(contour_count(&out), 4);
        for index in 0..4 {
            assert!((signed_area(&out, index).abs() - 5000.0).abs() < 1e-9);
        }
        // The first contour's halves come first.
        let first = contour_ranges(&out)[1].clone();
        assert!(out.elements()[first]
            .iter()
            .filter_map(anchor)
            .all(|p| p.y <= 100.0));
    }
}
