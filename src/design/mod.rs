//! Design tool pipeline: parametric edits of a whole glyph outline.
//!
//! 1. Shared spatial remap (width, slant, x-height, extenders,
//!    overshoot, optical size) applied point by point
//! 2. Normal-based offsets (weight, contrast, ink trap, serif)
//! 3. Handle roundness
//! 4. Spacing shift and rounding to font units

mod remap;
mod stroke;

use kurbo::{Affine, BezPath, Shape, Vec2};

use crate::config::{DesignParams, FontMetrics};
use crate::geom::{map_points, round_path};
use crate::normals::NormalField;

pub use remap::{Remap, Zone};

/// Output of [`apply`].
#[derive(Debug, Clone)]
pub struct DesignResult {
    pub path: BezPath,
    /// Change to add to the glyph's advance width.
    pub advance_delta: f64,
}

/// Run the design pipeline over one glyph outline.
///
/// Sliders are clamped to their ranges first. With every slider at zero
/// the output equals the input up to rounding.
pub fn apply(path: &BezPath, params: &DesignParams, metrics: &FontMetrics) -> DesignResult {
    let params = params.clamped();
    if params.is_identity() || path.elements().is_empty() {
        return DesignResult {
            path: round_path(path),
            advance_delta: 0.0,
        };
    }

    let bounds = path.bounding_box();
    let remap = Remap::new(&params, metrics, bounds);
    let mut current = BezPath::from_vec(
        path.elements()
            .iter()
            .map(|el| map_points(*el, |p| remap.apply(p)))
            .collect(),
    );

    if params.needs_normals() {
        let field = NormalField::compute(&current);
        current = stroke::offset(&field, &params, metrics, remap.zones());
    }

    if params.roundness != 0.0 {
        current = stroke::round_handles(&current, params.roundness);
    }

    if params.spacing != 0.0 {
        current.apply_affine(Affine::translate(Vec2::new(params.spacing, 0.0)));
    }

    let advance_delta = 2.0 * params.spacing + bounds.width() * params.width / 100.0;
    log::debug!(
        "design: {} elements, advance delta {:.1}",
        current.elements().len(),
        advance_delta
    );

    DesignResult {
        path: round_path(&current),
        advance_delta,
    }
}
