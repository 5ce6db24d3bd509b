//! End-to-end checks of the engine through its public API.

use glyphforge::contour::{self, Winding};
use glyphforge::degree::{self, Degree};
use glyphforge::kurbo::{BezPath, CubicBez, ParamCurve, PathEl, Point, QuadBez, Shape};
use glyphforge::{design, indent, slice, transform};
use glyphforge::{Axis, DesignParams, FontMetrics, SimplifyConfig};

fn rect(path: &mut BezPath, x0: f64, y0: f64, x1: f64, y1: f64) {
    path.move_to((x0, y0));
    path.line_to((x0, y1));
    path.line_to((x1, y1));
    path.line_to((x1, y0));
    path.close_path();
}

/// An "o": rounded outer fill with a rectangular counter.
fn letter_o() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 250.0));
    path.curve_to((0.0, 400.0), (100.0, 500.0), (250.0, 500.0));
    path.curve_to((400.0, 500.0), (500.0, 400.0), (500.0, 250.0));
    path.curve_to((500.0, 100.0), (400.0, 0.0), (250.0, 0.0));
    path.curve_to((100.0, 0.0), (0.0, 100.0), (0.0, 250.0));
    path.close_path();
    path.move_to((150.0, 150.0));
    path.line_to((350.0, 150.0));
    path.line_to((350.0, 350.0));
    path.line_to((150.0, 350.0));
    path.close_path();
    path
}

#[test]
fn line_promote_then_demote_is_exact() {
    let start = Point::new(12.0, -40.0);
    let line = PathEl::LineTo(Point::new(310.0, 95.0));
    let back = degree::demote(degree::promote(line, start), start);
    assert_eq!(back, line);
}

#[test]
fn quad_to_cubic_samples_identically() {
    let (start, control, end) = (Point::new(0.0, 0.0), Point::new(120.0, 300.0), Point::new(300.0, 0.0));
    let (c1, c2) = degree::quad_to_cubic(start, control, end);
    let quad = QuadBez::new(start, control, end);
    let cubic = CubicBez::new(start, c1, c2, end);
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        assert!((quad.eval(t) - cubic.eval(t)).hypot() < 1e-9);
    }
}

#[test]
fn double_reverse_keeps_anchor_cycle() {
    let path = letter_o();
    let twice = contour::reverse_contour(&contour::reverse_contour(&path, 0), 0);
    let range = contour::contour_range(&path, 0).unwrap();
    let original = contour::anchors(&path.elements()[range.clone()]);
    let restored = contour::anchors(&twice.elements()[range]);
    assert_eq!(original.len(), restored.len());
    let offset = restored.iter().position(|p| *p == original[0]).unwrap();
    for (i, p) in original.iter().enumerate() {
        assert_eq!(*p, restored[(i + offset) % restored.len()]);
    }
}

#[test]
fn reverse_flips_winding() {
    let path = letter_o();
    for index in 0..2 {
        let before = contour::winding(&path, index);
        let after = contour::winding(&contour::reverse_contour(&path, index), index);
        assert_ne!(before, after);
    }
}

#[test]
fn outer_is_fill_and_counter_is_hole() {
    let path = letter_o();
    assert_eq!(contour::winding(&path, 0), Winding::Fill);
    assert_eq!(contour::winding(&path, 1), Winding::Hole);
}

#[test]
fn make_fill_and_cutout_are_idempotent() {
    let path = letter_o();
    for index in 0..2 {
        let once = contour::make_fill(&path, index);
        assert_eq!(contour::make_fill(&once, index).elements(), once.elements());
        let once = contour::make_cutout(&path, index);
        assert_eq!(contour::make_cutout(&once, index).elements(), once.elements());
    }
}

#[test]
fn zero_design_params_are_the_identity() {
    let path = letter_o();
    let result = design::apply(&path, &DesignParams::default(), &FontMetrics::default());
    assert_eq!(result.path.elements(), path.elements());
    assert_eq!(result.advance_delta, 0.0);
}

#[test]
fn weight_opens_the_outer_and_closes_the_counter() {
    let path = letter_o();
    let params = DesignParams { weight: 50.0, ..Default::default() };
    let result = design::apply(&path, &params, &FontMetrics::default());
    let outer = contour::split_contours(&result.path);
    assert_eq!(outer.len(), 2);
    let outer_box = outer[0].bounding_box();
    let counter_box = outer[1].bounding_box();
    assert!(outer_box.width() > 500.0);
    assert!(counter_box.width() < 200.0);
}

#[test]
fn rectangle_slices_into_two_halves() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((100.0, 0.0));
    path.line_to((100.0, 100.0));
    path.line_to((0.0, 100.0));
    path.close_path();

    let out = slice::slice(&path, (Point::new(50.0, -10.0), Point::new(50.0, 110.0)));
    assert_eq!(contour::contour_count(&out), 2);
    for index in 0..2 {
        let range = contour::contour_range(&out, index).unwrap();
        let elements = &out.elements()[range];
        assert!(contour::is_closed(elements));
        assert_eq!(contour::anchors(elements).len(), 4);
        assert!((contour::signed_area(&out, index).abs() - 5000.0).abs() < 1e-9);
    }
}

#[test]
fn smooth_collinear_cubics_simplify_to_a_line() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.curve_to((60.0, 0.0), (110.0, 0.0), (150.0, 0.0));
    path.curve_to((190.0, 0.0), (240.0, 0.0), (300.0, 0.0));
    let out = glyphforge::simplify(&path, &SimplifyConfig::for_units_per_em(1000.0));
    assert_eq!(
        out.elements(),
        &[PathEl::MoveTo(Point::new(0.0, 0.0)), PathEl::LineTo(Point::new(300.0, 0.0))]
    );
}

#[test]
fn indent_of_inner_square_makes_one_hole() {
    let mut path = BezPath::new();
    rect(&mut path, 100.0, 100.0, 200.0, 200.0);
    rect(&mut path, 0.0, 0.0, 300.0, 300.0);
    let outer = contour::split_contours(&path)[1].clone();

    let out = indent::indent(&path, &[0]);
    let contours = contour::split_contours(&out);
    assert_eq!(contours.len(), 2);
    assert_eq!(contour::winding(&out, 0), Winding::Hole);
    let hole = contours[0].bounding_box();
    assert_eq!((hole.x0, hole.y0, hole.x1, hole.y1), (100.0, 100.0, 200.0, 200.0));
    assert_eq!(contours[1].elements(), outer.elements());
}

#[test]
fn flip_twice_restores_the_selection() {
    let path = letter_o();
    let flipped = transform::flip(&path, &[0, 1], Axis::Horizontal);
    assert_ne!(flipped.elements(), path.elements());
    let back = transform::flip(&flipped, &[0, 1], Axis::Horizontal);
    assert_eq!(back.elements(), path.elements());
}

#[test]
fn quadratic_conversion_keeps_lines() {
    let path = letter_o();
    let quads = degree::path_to_degree(&path, Degree::Quad);
    let counts = |p: &BezPath| {
        p.elements()
            .iter()
            .fold((0, 0, 0), |(l, q, c), el| match el {
                PathEl::LineTo(_) => (l + 1, q, c),
                PathEl::QuadTo(..) => (l, q + 1, c),
                PathEl::CurveTo(..) => (l, q, c + 1),
                _ => (l, q, c),
            })
    };
    assert_eq!(counts(&quads), (3, 4, 0));
}
