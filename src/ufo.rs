//! Conversion between UFO glyph contours and a single outline path.

use kurbo::{BezPath, PathEl, Point};
use norad::{Contour, ContourPoint, Glyph, PointType};

use crate::contour::split_contours;
use crate::error::OutlineError;
use crate::geom::unit;

/// Closing on-curve points this close to the start are dropped.
const CLOSING_EPSILON: f64 = 0.5;

/// All contours of a glyph as one path, in glyph order.
pub fn glyph_to_path(glyph: &Glyph) -> Result<BezPath, OutlineError> {
    let mut path = BezPath::new();
    for contour in &glyph.contours {
        for el in from_contour(contour)?.elements() {
            path.push(*el);
        }
    }
    Ok(path)
}

/// Replace a glyph's contours with the path's contours.
pub fn set_glyph_path(glyph: &mut Glyph, path: &BezPath) -> Result<(), OutlineError> {
    glyph.contours = split_contours(path)
        .iter()
        .map(to_contour)
        .collect::<Result<_, _>>()?;
    Ok(())
}

/// Convert one UFO contour to path elements.
///
/// Open contours start at their `move` point. Closed contours start at
/// their first on-curve point and end with `ClosePath`; runs of
/// quadratic off-curve points get their implied on-curve midpoints.
pub fn from_contour(contour: &Contour) -> Result<BezPath, OutlineError> {
    let points = &contour.points;
    if points.is_empty() {
        return Err(OutlineError::EmptyContour);
    }
    let mut path = BezPath::new();

    if points[0].typ == PointType::Move {
        path.move_to(point(&points[0]));
        let mut pending = Vec::new();
        for p in &points[1..] {
            push_point(&mut path, &mut pending, p)?;
        }
        return Ok(path);
    }

    let start = points
        .iter()
        .position(|p| p.typ != PointType::OffCurve)
        .ok_or_else(|| OutlineError::InvalidPath("closed contour has no on-curve point".into()))?;
    let n = points.len();
    path.move_to(point(&points[start]));
    let mut pending = Vec::new();
    for k in 1..=n {
        let p = &points[(start + k) % n];
        // The closing line is drawn by ClosePath.
        if k == n && (p.typ == PointType::Line || pending.is_empty()) {
            break;
        }
        push_point(&mut path, &mut pending, p)?;
    }
    path.close_path();
    Ok(path)
}

fn point(p: &ContourPoint) -> Point {
    Point::new(p.x, p.y)
}

/// Feed one point, emitting a segment whenever an on-curve point ends one.
fn push_point(
    path: &mut BezPath,
    pending: &mut Vec<Point>,
    p: &ContourPoint,
) -> Result<(), OutlineError> {
    let end = point(p);
    match p.typ {
        PointType::OffCurve => {
            pending.push(end);
            return Ok(());
        }
        PointType::Line | PointType::Move => path.line_to(end),
        PointType::Curve => match pending.as_slice() {
            [] => path.line_to(end),
            [a] => path.quad_to(*a, end),
            [a, b] => path.curve_to(*a, *b, end),
            _ => {
                return Err(OutlineError::InvalidPath(format!(
                    "curve with {} off-curve points",
                    pending.len()
                )))
            }
        },
        PointType::QCurve => match pending.as_slice() {
            [] => path.line_to(end),
            controls => {
                for pair in controls.windows(2) {
                    path.quad_to(pair[0], pair[0].midpoint(pair[1]));
                }
                if let Some(last) = controls.last() {
                    path.quad_to(*last, end);
                }
            }
        },
    }
    pending.clear();
    Ok(())
}

/// Convert one path contour to a UFO contour.
pub fn to_contour(path: &BezPath) -> Result<Contour, OutlineError> {
    let elements = path.elements();
    let first = match elements.first() {
        Some(PathEl::MoveTo(p)) => *p,
        Some(_) => return Err(OutlineError::InvalidPath("path must start with MoveTo".into())),
        None => return Err(OutlineError::EmptyContour),
    };
    let closed = matches!(elements.last(), Some(PathEl::ClosePath));

    let mut points: Vec<ContourPoint> = Vec::new();
    for el in elements.iter().skip(1) {
        match *el {
            PathEl::LineTo(p) => points.push(contour_point(p, PointType::Line, false)),
            PathEl::CurveTo(a, b, p) => {
                points.push(contour_point(a, PointType::OffCurve, false));
                points.push(contour_point(b, PointType::OffCurve, false));
                points.push(contour_point(p, PointType::Curve, false));
            }
            PathEl::QuadTo(a, p) => {
                points.push(contour_point(a, PointType::OffCurve, false));
                points.push(contour_point(p, PointType::QCurve, false));
            }
            PathEl::ClosePath => {}
            PathEl::MoveTo(_) => {
                return Err(OutlineError::InvalidPath("unexpected MoveTo mid-path".into()))
            }
        }
    }

    if !closed {
        points.insert(0, contour_point(first, PointType::Move, false));
        return Ok(Contour::new(points, None, None));
    }

    // UFO contours are cyclic: the start point takes the closing
    // segment's type, and a closing on-curve on the start is dropped.
    let closing_type = elements
        .iter()
        .rev()
        .find(|e| !matches!(e, PathEl::ClosePath))
        .map(|e| match e {
            PathEl::CurveTo(..) => PointType::Curve,
            PathEl::QuadTo(..) => PointType::QCurve,
            _ => PointType::Line,
        })
        .unwrap_or(PointType::Line);
    let returns_to_start = points.last().is_some_and(|last| {
        last.typ != PointType::OffCurve
            && (last.x - first.x).abs() < CLOSING_EPSILON
            && (last.y - first.y).abs() < CLOSING_EPSILON
    });
    let start_type = if returns_to_start {
        points.pop();
        closing_type
    } else {
        PointType::Line
    };
    points.insert(0, contour_point(first, start_type, false));
    mark_smooth(&mut points);

    Ok(Contour::new(points, None, None))
}

/// Flag on-curve points whose neighbouring handles are collinear.
fn mark_smooth(points: &mut [ContourPoint]) {
    let n = points.len();
    if n < 3 {
        return;
    }
    for i in 0..n {
        if points[i].typ == PointType::OffCurve {
            continue;
        }
        let prev = &points[(i + n - 1) % n];
        let next = &points[(i + 1) % n];
        if prev.typ != PointType::OffCurve && next.typ != PointType::OffCurve {
            continue;
        }
        let here = point(&points[i]);
        let (Some(a), Some(b)) = (
            unit(here - point(prev)),
            unit(point(next) - here),
        ) else {
            continue;
        };
        points[i].smooth = a.dot(b) > 0.999;
    }
}

fn contour_point(p: Point, typ: PointType, smooth: bool) -> ContourPoint {
    ContourPoint::new(p.x, p.y, typ, smooth, None, None, None)
}
