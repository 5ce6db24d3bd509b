//! Affine edits over a selection of contours.
//!
//! Every operation touches only the anchors and controls of the selected
//! contours and rounds what it moves to integer font units. An empty or
//! out-of-range selection leaves the path untouched.

use kurbo::{Affine, BezPath, Point, Rect, Vec2};

use crate::contour::contour_ranges;
use crate::geom::{control_bounds, map_points};

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mirror left/right (x → −x).
    Horizontal,
    /// Mirror top/bottom (y → −y).
    Vertical,
}

/// Apply `affine` to the selected contours.
pub fn apply_affine(path: &BezPath, contours: &[usize], affine: Affine) -> BezPath {
    let mut elements = path.elements().to_vec();
    for (i, range) in contour_ranges(path).into_iter().enumerate() {
        if !contours.contains(&i) {
            continue;
        }
        for el in &mut elements[range] {
            *el = map_points(*el, |p| (affine * p).round());
        }
    }
    BezPath::from_vec(elements)
}

/// Bounding box of every anchor and control in the selection.
pub fn selection_bounds(path: &BezPath, contours: &[usize]) -> Option<Rect> {
    let elements = path.elements();
    contour_ranges(path)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| contours.contains(i))
        .filter_map(|(_, range)| control_bounds(&elements[range]))
        .reduce(|a, b| a.union(b))
}

pub fn translate(path: &BezPath, contours: &[usize], dx: f64, dy: f64) -> BezPath {
    apply_affine(path, contours, Affine::translate(Vec2::new(dx, dy)))
}

/// Scale by (sx, sy) about `origin`.
pub fn scale(path: &BezPath, contours: &[usize], sx: f64, sy: f64, origin: Point) -> BezPath {
    apply_affine(path, contours, about(origin, Affine::scale_non_uniform(sx, sy)))
}

/// Rotate counter-clockwise by `degrees` about `origin`.
pub fn rotate(path: &BezPath, contours: &[usize], degrees: f64, origin: Point) -> BezPath {
    apply_affine(path, contours, about(origin, Affine::rotate(degrees.to_radians())))
}

/// Shear about `origin`.
///
/// `x` moves by tan(`deg_x`) times the point's vertical offset from the
/// origin; `y` moves by tan(`deg_y`) times its horizontal offset.
pub fn skew(path: &BezPath, contours: &[usize], deg_x: f64, deg_y: f64, origin: Point) -> BezPath {
    let shear = Affine::skew(deg_x.to_radians().tan(), deg_y.to_radians().tan());
    apply_affine(path, contours, about(origin, shear))
}

/// Mirror the selection about its own bounding-box center.
pub fn flip(path: &BezPath, contours: &[usize], axis: Axis) -> BezPath {
    let Some(bounds) = selection_bounds(path, contours) else {
        return path.clone();
    };
    let (sx, sy) = match axis {
        Axis::Horizontal => (-1.0, 1.0),
        Axis::Vertical => (1.0, -1.0),
    };
    scale(path, contours, sx, sy, bounds.center())
}

fn about(origin: Point, affine: Affine) -> Affine {
    Affine::translate(origin.to_vec2()) * affine * Affine::translate(-origin.to_vec2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn two_squares() -> BezPath {
        let mut path = BezPath::new();
        for x in [0.0, 200.0] {
            path.move_to((x, 0.0));
            path.line_to((x, 100.0));
            path.line_to((x + 100.0, 100.0));
            path.line_to((x + 100.0, 0.0));
            path.close_path();
        }
        path
    }

    #[test]
    fn translate_touches_only_the_selection() {
        let path = two_squares();
        let moved = translate(&path, &[1], 10.0, -5.0);
        assert_eq!(moved.elements()[..5], path.elements()[..5]);
        assert_eq!(moved.elements()[5], PathEl::MoveTo(Point::new(210.0, -5.0)));
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let path = two_squares();
        assert_eq!(rotate(&path, &[], 45.0, Point::ZERO).elements(), path.elements());
        assert_eq!(flip(&path, &[4], Axis::Vertical).elements(), path.elements());
    }

    #[test]
    fn rotation_rounds_to_font_units() {
        let path = two_squares();
        let turned = rotate(&path, &[0], 90.0, Point::ZERO);
        assert_eq!(turned.elements()[1], PathEl::LineTo(Point::new(-100.0, 0.0)));
    }

    #[test]
    fn skew_shifts_by_vertical_offset() {
        let path = two_squares();
        let slanted = skew(&path, &[0], 45.0, 0.0, Point::ZERO);
        assert_eq!(slanted.elements()[1], PathEl::LineTo(Point::new(100.0, 100.0)));
        assert_eq!(slanted.elements()[0], PathEl::MoveTo(Point::ZERO));
    }

    #[test]
    fn flip_mirrors_about_selection_center() {
        let path = two_squares();
        let flipped = flip(&path, &[1], Axis::Horizontal);
        assert_eq!(flipped.elements()[5], PathEl::MoveTo(Point::new(300.0, 0.0)));
        assert_eq!(
            selection_bounds(&flipped, &[1]),
            selection_bounds(&path, &[1])
        );
    }

    #[test]
    fn scale_about_origin() {
        let path = two_squares();
        let scaled = scale(&path, &[0], 2.0, 0.5, Point::new(50.0, 50.0));
        assert_eq!(scaled.elements()[0], PathEl::MoveTo(Point::new(-50.0, 25.0)));
    }
}
