//! Boolean indent: turn contours into holes clipped to the filled area.
//!
//! Curves are flattened to polygon rings before clipping and are not
//! reconstructed afterwards; every generated contour is made of lines.

use geo::{BooleanOps, LineString, MultiPolygon, Polygon};
use kurbo::{BezPath, PathEl, Point};

use crate::contour::{contour_ranges, is_closed, winding, Winding};
use crate::degree::eval;
use crate::geom::{anchor, polygon_area};

/// Samples taken along each curve when flattening.
const CURVE_SAMPLES: usize = 16;

/// A closed polygon, first point not repeated at the end.
pub type Ring = Vec<Point>;

/// 2D polygon union and intersection over ring lists.
pub trait PolygonClipper {
    fn union(&self, rings: &[Ring]) -> Vec<Ring>;
    fn intersection(&self, a: &[Ring], b: &[Ring]) -> Vec<Ring>;
}

/// [`PolygonClipper`] backed by the `geo` crate's boolean operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoClipper;

impl PolygonClipper for GeoClipper {
    fn union(&self, rings: &[Ring]) -> Vec<Ring> {
        let merged = rings
            .iter()
            .map(|ring| MultiPolygon::new(vec![to_polygon(ring)]))
            .fold(MultiPolygon::new(Vec::new()), |acc, next| acc.union(&next));
        from_multi(&merged)
    }

    fn intersection(&self, a: &[Ring], b: &[Ring]) -> Vec<Ring> {
        let a = MultiPolygon::new(a.iter().map(|r| to_polygon(r)).collect());
        let b = MultiPolygon::new(b.iter().map(|r| to_polygon(r)).collect());
        from_multi(&a.intersection(&b))
    }
}

fn to_polygon(ring: &[Point]) -> Polygon<f64> {
    let coords: Vec<(f64, f64)> = ring.iter().map(|p| (p.x, p.y)).collect();
    Polygon::new(LineString::from(coords), Vec::new())
}

/// Exterior rings of every polygon, closing duplicate dropped.
fn from_multi(multi: &MultiPolygon<f64>) -> Vec<Ring> {
    multi
        .0
        .iter()
        .map(|polygon| {
            let mut ring: Ring = polygon
                .exterior()
                .coords()
                .map(|c| Point::new(c.x, c.y))
                .collect();
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            ring
        })
        .filter(|ring| ring.len() >= 3)
        .collect()
}

/// Flatten one contour's elements to a ring.
pub fn flatten(elements: &[PathEl]) -> Ring {
    let mut ring = Vec::new();
    let mut current = Point::ZERO;
    for el in elements {
        match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => ring.push(*p),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {
                ring.extend(
                    (1..=CURVE_SAMPLES).filter_map(|i| eval(el, current, i as f64 / CURVE_SAMPLES as f64)),
                );
            }
            PathEl::ClosePath => {}
        }
        if let Some(p) = anchor(el) {
            current = p;
        }
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// [`indent_with`] using [`GeoClipper`].
pub fn indent(path: &BezPath, indenting: &[usize]) -> BezPath {
    indent_with(path, indenting, &GeoClipper)
}

/// Replace each indenting contour with the holes it cuts out of the
/// union of the remaining fill contours.
///
/// Only closed, fill-wound contours outside `indenting` form the union.
/// An indenting contour whose intersection is empty (or that is open,
/// or out of range) is left as it was.
pub fn indent_with(path: &BezPath, indenting: &[usize], clipper: &dyn PolygonClipper) -> BezPath {
    let elements = path.elements();
    let ranges = contour_ranges(path);

    let fills: Vec<Ring> = ranges
        .iter()
        .enumerate()
        .filter(|(i, range)| {
            !indenting.contains(i)
                && is_closed(&elements[(*range).clone()])
                && winding(path, *i) == Winding::Fill
        })
        .map(|(_, range)| flatten(&elements[range.clone()]))
        .collect();
    let union = clipper.union(&fills);

    let mut output = BezPath::new();
    for (i, range) in ranges.iter().enumerate() {
        let contour = &elements[range.clone()];
        let holes = if indenting.contains(&i) && is_closed(contour) && !union.is_empty() {
            clipper.intersection(&[flatten(contour)], &union)
        } else {
            Vec::new()
        };
        if holes.is_empty() {
            for el in contour {
                output.push(*el);
            }
            continue;
        }
        log::debug!("indent: contour {} -> {} hole(s)", i, holes.len());
        for hole in holes {
            push_hole(&mut output, hole);
        }
    }
    output
}

/// Append a ring as a line contour with hole winding, rounded.
fn push_hole(output: &mut BezPath, mut ring: Ring) {
    if polygon_area(&ring) < 0.0 {
        ring.reverse();
    }
    let mut points = ring.into_iter().map(|p| p.round());
    let Some(first) = points.next() else {
        return;
    };
    output.move_to(first);
    for p in points {
        output.line_to(p);
    }
    output.close_path();
}
