//! Straight-segment cleanup: near-straight curves to lines, collinear
//! line points removed.

use kurbo::{BezPath, Line, ParamCurveNearest, PathEl, Point};

use crate::geom::{anchor, point_to_line_dist};

/// Convert cubics whose two handles both hug the chord.
pub fn curves_to_lines(path: &BezPath, tolerance: f64) -> BezPath {
    let mut current = Point::ZERO;
    path.elements()
        .iter()
        .map(|&el| {
            let out = match el {
                PathEl::CurveTo(a, b, p)
                    if point_to_line_dist(a, current, p) < tolerance
                        && point_to_line_dist(b, current, p) < tolerance =>
                {
                    PathEl::LineTo(p)
                }
                other => other,
            };
            if let Some(p) = anchor(&el) {
                current = p;
            }
            out
        })
        .collect()
}

/// Drop intermediate points of line runs. A point goes only if it, and
/// every point already dropped with it, stays within `tolerance` of the
/// segment that replaces them. A run's final point is kept.
pub fn merge_collinear(path: &BezPath, tolerance: f64) -> BezPath {
    let mut output = BezPath::new();
    // Start of the current line run (already emitted) and its line ends.
    let mut run: Vec<Point> = Vec::new();

    for &el in path.elements() {
        match el {
            PathEl::LineTo(p) if !run.is_empty() => run.push(p),
            _ => {
                emit_run(&mut output, &run, tolerance);
                run.clear();
                output.push(el);
                if let Some(p) = anchor(&el) {
                    run.push(p);
                }
            }
        }
    }
    emit_run(&mut output, &run, tolerance);
    output
}

/// Emit `run[1..]` as lines, greedily skipping points the tolerance allows.
fn emit_run(output: &mut BezPath, run: &[Point], tolerance: f64) {
    let mut start = 0;
    let mut end = 1;
    while end < run.len() {
        let mut reach = end;
        while reach + 1 < run.len()
            && covers(run[start], run[reach + 1], &run[start + 1..=reach], tolerance)
        {
            reach += 1;
        }
        output.line_to(run[reach]);
        start = reach;
        end = reach + 1;
    }
}

fn covers(from: Point, to: Point, skipped: &[Point], tolerance: f64) -> bool {
    let chord = Line::new(from, to);
    let limit = tolerance * tolerance;
    skipped.iter().all(|&p| chord.nearest(p, 1e-9).distance_sq < limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_cubic_becomes_line() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((30.0, 0.5), (70.0, -0.5), (100.0, 0.0));
        path.curve_to((100.0, 50.0), (50.0, 100.0), (0.0, 100.0));
        let out = curves_to_lines(&path, 1.0);
        assert_eq!(out.elements()[1], PathEl::LineTo(Point::new(100.0, 0.0)));
        assert!(matches!(out.elements()[2], PathEl::CurveTo(..)));
    }

    #[test]
    fn collinear_run_keeps_final_point() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((50.0, 0.0));
        path.line_to((100.0, 0.3));
        path.line_to((150.0, 0.0));
        path.line_to((150.0, 80.0));
        path.close_path();
        let out = merge_collinear(&path, 1.0);
        assert_eq!(
            out.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(150.0, 0.0)),
                PathEl::LineTo(Point::new(150.0, 80.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn dense_shallow_arc_stays_within_tolerance() {
        // Each step bends by far less than the tolerance, but the arc as
        // a whole sags well past it.
        let radius = 10_000.0;
        let points: Vec<Point> = (0..=200)
            .map(|i| {
                let a = i as f64 * 10.0 / radius;
                Point::new(radius * a.sin(), radius * (1.0 - a.cos()))
            })
            .collect();
        let mut path = BezPath::new();
        path.move_to(points[0]);
        for &p in &points[1..] {
            path.line_to(p);
        }
        let out = merge_collinear(&path, 1.0);

        let kept: Vec<Point> = out.elements().iter().filter_map(anchor).collect();
        assert!(kept.len() > 2 && kept.len() < points.len());
        assert_eq!(kept.last(), points.last());
        for &p in &points {
            let nearest = kept
                .windows(2)
                .map(|w| Line::new(w[0], w[1]).nearest(p, 1e-9).distance_sq.sqrt())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1.0, "{p:?} is {nearest} off the merged outline");
        }
    }

    #[test]
    fn backtracking_point_is_kept() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((50.0, 0.0));
        let out = merge_collinear(&path, 1.0);
        assert_eq!(out.elements().len(), 3);
    }
}
