//! Geometric extrema of cubic curves.
//!
//! Extrema come from the roots of each axis' derivative, not from anchor
//! positions, so a bulge between two anchors is still found.

use kurbo::common::solve_quadratic;
use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv, Point, Rect};

/// Roots closer than this to t=0 or t=1 are skipped.
const ENDPOINT_MARGIN: f64 = 0.01;

/// Values within this distance of a bounding-box edge lie on it.
const EDGE_TOLERANCE: f64 = 0.5;

/// Interior t-values where the cubic's x or y derivative vanishes.
///
/// The derivative is a quadratic Bézier; each axis is solved in power
/// form, which has the same roots as
/// 3(−P0+3P1−3P2+P3)t² + 6(P0−2P1+P2)t + 3(P1−P0).
pub fn extrema_t_values(cubic: &CubicBez) -> Vec<f64> {
    let d = cubic.deriv();
    let axes = [(d.p0.x, d.p1.x, d.p2.x), (d.p0.y, d.p1.y, d.p2.y)];
    let mut t_values: Vec<f64> = axes
        .into_iter()
        .flat_map(|(d0, d1, d2)| solve_quadratic(d0, 2.0 * (d1 - d0), d0 - 2.0 * d1 + d2))
        .filter(|&t| t > ENDPOINT_MARGIN && t < 1.0 - ENDPOINT_MARGIN)
        .collect();
    t_values.sort_by(f64::total_cmp);
    t_values.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
    t_values
}

/// Tight bounds of a contour given its anchors and cubic segments.
pub fn contour_bounds(anchors: &[Point], cubics: &[CubicBez]) -> Option<Rect> {
    let mut points: Vec<Point> = anchors.to_vec();
    for cubic in cubics {
        points.extend(extrema_t_values(cubic).into_iter().map(|t| cubic.eval(t)));
    }
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p)),
    )
}

/// Whether `p` lies on an edge of `bounds`.
pub fn on_bounds_edge(p: Point, bounds: &Rect) -> bool {
    (p.x - bounds.x0).abs() < EDGE_TOLERANCE
        || (p.x - bounds.x1).abs() < EDGE_TOLERANCE
        || (p.y - bounds.y0).abs() < EDGE_TOLERANCE
        || (p.y - bounds.y1).abs() < EDGE_TOLERANCE
}

/// Whether the cubic reaches an edge of `bounds` strictly between its ends.
pub fn has_interior_extremum(cubic: &CubicBez, bounds: &Rect) -> bool {
    extrema_t_values(cubic)
        .into_iter()
        .any(|t| on_bounds_edge(cubic.eval(t), bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arch_has_one_vertical_extremum() {
        let arch = CubicBez::new((0.0, 0.0), (0.0, 100.0), (200.0, 100.0), (200.0, 0.0));
        let ts = extrema_t_values(&arch);
        assert_eq!(ts.len(), 1);
        assert!((ts[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn monotone_quarter_has_none() {
        let quarter = CubicBez::new((0.0, 0.0), (0.0, 55.0), (45.0, 100.0), (100.0, 100.0));
        assert!(extrema_t_values(&quarter).is_empty());
    }

    #[test]
    fn s_bend_has_two_horizontal_extrema() {
        let s_bend = CubicBez::new((0.0, 0.0), (100.0, 30.0), (-100.0, 70.0), (0.0, 100.0));
        let ts = extrema_t_values(&s_bend);
        let offset = 3.0_f64.sqrt() / 6.0;
        assert_eq!(ts.len(), 2);
        assert!((ts[0] - (0.5 - offset)).abs() < 1e-9);
        assert!((ts[1] - (0.5 + offset)).abs() < 1e-9);
    }

    #[test]
    fn bounds_include_bulges() {
        let arch = CubicBez::new((0.0, 0.0), (0.0, 100.0), (200.0, 100.0), (200.0, 0.0));
        let bounds = contour_bounds(&[arch.p0, arch.p3], &[arch]).unwrap();
        assert!((bounds.y1 - 75.0).abs() < 1e-9);
        assert!(has_interior_extremum(&arch, &bounds));
        assert!(on_bounds_edge(Point::new(100.0, 75.0), &bounds));
    }
}
