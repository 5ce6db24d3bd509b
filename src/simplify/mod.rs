//! Outline simplifier: fewer segments, same shape.
//!
//! Stages, each a pure function over a whole path:
//! 1. Duplicate points removed, quadratics raised to cubics (exact)
//! 2. Near-straight cubics collapsed to lines
//! 3. Smooth cubic runs merged by least-squares refit, repeated
//! 4. Collinear line points removed
//!
//! Tolerances come from [`SimplifyConfig`], which scales them with the
//! font's units per em.

mod extrema;
mod lines;
mod merge;

use kurbo::{BezPath, PathEl, Point};

use crate::config::SimplifyConfig;
use crate::contour::remove_duplicate_points;
use crate::degree::quad_to_cubic;
use crate::geom::{anchor, round_path};

pub use extrema::extrema_t_values;
pub use lines::{curves_to_lines, merge_collinear};
pub use merge::{merge_smooth_runs, refit_run};

/// Run the full pipeline. Output coordinates are rounded to font units.
pub fn simplify(path: &BezPath, config: &SimplifyConfig) -> BezPath {
    let before = path.elements().len();
    let deduped = remove_duplicate_points(path);
    let cubic = quads_to_cubics(&deduped);

    let lined = curves_to_lines(&cubic, config.straight_tolerance);
    log::debug!(
        "simplify: lines {} -> {} elements",
        cubic.elements().len(),
        lined.elements().len()
    );

    let merged = merge_passes(&lined, config);
    let result = round_path(&merge_collinear(&merged, config.collinear_tolerance));
    log::debug!("simplify: {} -> {} elements", before, result.elements().len());
    result
}

/// Raise every quadratic to the cubic with the same shape. Unrounded.
pub fn quads_to_cubics(path: &BezPath) -> BezPath {
    let mut output = BezPath::new();
    let mut current = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::QuadTo(a, p) => {
                let (c1, c2) = quad_to_cubic(current, a, p);
                output.curve_to(c1, c2, p);
            }
            other => output.push(other),
        }
        if let Some(p) = anchor(el) {
            current = p;
        }
    }
    output
}

/// Repeat [`merge_smooth_runs`] until nothing shrinks or the pass cap.
fn merge_passes(path: &BezPath, config: &SimplifyConfig) -> BezPath {
    let mut current = path.clone();
    for pass in 0..config.max_passes {
        let next = merge_smooth_runs(&current, config);
        let (was, now) = (current.elements().len(), next.elements().len());
        log::trace!("simplify: merge pass {}: {} -> {}", pass + 1, was, now);
        current = next;
        if now >= was {
            break;
        }
    }
    current
}
