//! Merging runs of smoothly joined cubics into single cubics.
//!
//! A run grows one segment at a time while the join is smooth, the join
//! is not a bounding-box extremum of the contour, and a least-squares
//! refit of the whole run stays within tolerance.

use kurbo::{
    BezPath, CubicBez, ParamCurve, ParamCurveArclen, ParamCurveNearest, PathEl, Point, Vec2,
};

use crate::config::SimplifyConfig;
use crate::contour::contour_ranges;
use crate::geom::{anchor, unit, EPSILON};

use super::extrema::{contour_bounds, has_interior_extremum, on_bounds_edge};

/// Accuracy for arc length and nearest-point queries.
const CURVE_ACCURACY: f64 = 1e-3;

/// One merge pass over every contour.
pub fn merge_smooth_runs(path: &BezPath, config: &SimplifyConfig) -> BezPath {
    let elements = path.elements();
    let mut output = BezPath::new();
    for range in contour_ranges(path) {
        for el in merge_contour(&elements[range], config) {
            output.push(el);
        }
    }
    output
}

fn merge_contour(elements: &[PathEl], config: &SimplifyConfig) -> Vec<PathEl> {
    let Some(PathEl::MoveTo(start)) = elements.first().copied() else {
        return elements.to_vec();
    };

    // Pair every drawing element with the anchor it starts from.
    let mut pieces: Vec<(Point, PathEl)> = Vec::new();
    let mut current = start;
    for el in &elements[1..] {
        if let Some(p) = anchor(el) {
            pieces.push((current, *el));
            current = p;
        }
    }
    let cubic_of = |(from, el): (Point, PathEl)| match el {
        PathEl::CurveTo(a, b, p) => Some(CubicBez::new(from, a, b, p)),
        _ => None,
    };
    let cubics: Vec<Option<CubicBez>> = pieces.iter().map(|&piece| cubic_of(piece)).collect();

    let anchors: Vec<Point> = std::iter::once(start)
        .chain(pieces.iter().filter_map(|(_, el)| anchor(el)))
        .collect();
    let all_cubics: Vec<CubicBez> = cubics.iter().flatten().copied().collect();
    let Some(bounds) = contour_bounds(&anchors, &all_cubics) else {
        return elements.to_vec();
    };

    let joinable = |left: &CubicBez, right: &CubicBez| -> bool {
        let (Some(incoming), Some(outgoing)) = (end_tangent(left), start_tangent(right)) else {
            return false;
        };
        incoming.dot(outgoing) > config.smooth_dot
            && !on_bounds_edge(left.p3, &bounds)
            && !has_interior_extremum(left, &bounds)
            && !has_interior_extremum(right, &bounds)
    };

    let mut output = vec![PathEl::MoveTo(start)];
    let mut k = 0;
    while k < pieces.len() {
        let Some(first) = cubics[k] else {
            output.push(pieces[k].1);
            k += 1;
            continue;
        };
        let mut best = first;
        let mut end = k;
        while end + 1 < pieces.len() {
            let (Some(last), Some(next)) = (cubics[end], cubics[end + 1]) else {
                break;
            };
            if !joinable(&last, &next) {
                break;
            }
            let run: Vec<CubicBez> = cubics[k..=end + 1].iter().flatten().copied().collect();
            match refit_run(&run, config) {
                Some(cubic) => {
                    best = cubic;
                    end += 1;
                }
                None => break,
            }
        }
        output.push(PathEl::CurveTo(best.p1, best.p2, best.p3));
        k = end + 1;
    }
    if matches!(elements.last(), Some(PathEl::ClosePath)) {
        output.push(PathEl::ClosePath);
    }
    output
}

fn start_tangent(c: &CubicBez) -> Option<Vec2> {
    unit(c.p1 - c.p0)
        .or_else(|| unit(c.p2 - c.p0))
        .or_else(|| unit(c.p3 - c.p0))
}

fn end_tangent(c: &CubicBez) -> Option<Vec2> {
    unit(c.p3 - c.p2)
        .or_else(|| unit(c.p3 - c.p1))
        .or_else(|| unit(c.p3 - c.p0))
}

/// Fit one cubic to a run of cubics, or `None` if it is out of tolerance.
///
/// Endpoints and end tangent directions are fixed; the two handle lengths
/// solve the least-squares normal equations over samples parameterized by
/// cumulative arc length.
pub fn refit_run(run: &[CubicBez], config: &SimplifyConfig) -> Option<CubicBez> {
    let (first, last) = (run.first()?, run.last()?);
    let p0 = first.p0;
    let p3 = last.p3;
    let t0 = start_tangent(first)?;
    let t3 = end_tangent(last)?;

    let samples = sample_run(run, config.samples_per_segment.max(2));
    let total = samples.last().map_or(0.0, |s| s.1);
    if total < EPSILON {
        return None;
    }

    let (a, b) = solve_handles(p0, t0, p3, t3, &samples, total)
        .unwrap_or_else(|| fallback_handles(first, last, total));
    let candidate = CubicBez::new(p0, p0 + t0 * a, p3 - t3 * b, p3);

    let limit = config.fit_tolerance * config.fit_tolerance;
    let error = samples
        .iter()
        .map(|(p, _)| candidate.nearest(*p, CURVE_ACCURACY).distance_sq)
        .fold(0.0, f64::max);
    if error <= limit {
        Some(candidate)
    } else {
        log::trace!("refit of {} segments rejected: error² {:.2}", run.len(), error);
        None
    }
}

/// Handle lengths when the solve fails: the run's chord, shared in
/// proportion to each end segment's share of the run's arc length.
fn fallback_handles(first: &CubicBez, last: &CubicBez, total: f64) -> (f64, f64) {
    let chord = (last.p3 - first.p0).hypot();
    let share = |c: &CubicBez| c.arclen(CURVE_ACCURACY) / total.max(EPSILON);
    (chord * share(first), chord * share(last))
}

/// Samples of a run paired with cumulative polyline length from the start.
fn sample_run(run: &[CubicBez], per_segment: usize) -> Vec<(Point, f64)> {
    let mut samples = vec![(run[0].p0, 0.0)];
    let mut length = 0.0;
    let mut previous = run[0].p0;
    for cubic in run {
        for j in 1..=per_segment {
            let p = cubic.eval(j as f64 / per_segment as f64);
            length += (p - previous).hypot();
            samples.push((p, length));
            previous = p;
        }
    }
    samples
}

/// Least-squares handle lengths; `None` if singular or non-positive.
fn solve_handles(
    p0: Point,
    t0: Vec2,
    p3: Point,
    t3: Vec2,
    samples: &[(Point, f64)],
    total: f64,
) -> Option<(f64, f64)> {
    let (mut c11, mut c12, mut c22, mut x1, mut x2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(p, s) in samples {
        let u = s / total;
        let mt = 1.0 - u;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * u * mt * mt;
        let b2 = 3.0 * u * u * mt;
        let b3 = u * u * u;
        let v1 = t0 * b1;
        let v2 = -t3 * b2;
        let fixed = p0.to_vec2() * (b0 + b1) + p3.to_vec2() * (b2 + b3);
        let residual = p.to_vec2() - fixed;
        c11 += v1.dot(v1);
        c12 += v1.dot(v2);
        c22 += v2.dot(v2);
        x1 += v1.dot(residual);
        x2 += v2.dot(residual);
    }
    let det = c11 * c22 - c12 * c12;
    if det.abs() < 1e-12 {
        return None;
    }
    let a = (x1 * c22 - c12 * x2) / det;
    let b = (c11 * x2 - c12 * x1) / det;
    if a > 0.0 && b > 0.0 {
        Some((a, b))
    } else {
        None
    }
}
