//! Normal-based stroke edits and handle roundness.

use kurbo::{BezPath, PathEl, Point, Vec2};

use crate::config::{DesignParams, FontMetrics};
use crate::design::remap::Zone;
use crate::geom::anchor;
use crate::normals::NormalField;

/// Offset along the normal at full weight (fraction of upm).
const WEIGHT_SHIFT: f64 = 0.05;
/// Offset difference between stroke orientations at full contrast.
const CONTRAST_SHIFT: f64 = 0.03;
/// Inward pull at full ink trap, before the acuteness factor.
const INK_TRAP_SHIFT: f64 = 0.015;
/// Side normals meeting below this dot product form an acute joint.
const INK_TRAP_DOT: f64 = 0.3;
/// Serif extension at full slider (fraction of upm).
const SERIF_SHIFT: f64 = 0.02;
/// Distance from a zone line that counts as "at" the zone (fraction of upm).
const SERIF_ZONE_BAND: f64 = 0.04;
/// |normal.x| above this is a mostly-vertical stroke.
const SERIF_VERTICAL: f64 = 0.7;

/// Offset every anchor and control of the field's path.
///
/// Weight and contrast move each point along its own normal. Ink traps
/// and serifs are decided at anchors; the adjacent handles move with
/// their anchor so curve shape near the joint is kept.
pub fn offset(
    field: &NormalField,
    params: &DesignParams,
    metrics: &FontMetrics,
    zones: &[Zone],
) -> BezPath {
    let upm = metrics.units_per_em;
    let weight = params.weight / 100.0 * WEIGHT_SHIFT * upm;
    let contrast = params.contrast / 100.0 * CONTRAST_SHIFT * upm;
    let along = |normal: Option<Vec2>| -> Vec2 {
        match normal {
            Some(n) => n * (weight + contrast * (n.x * n.x - n.y * n.y)),
            None => Vec2::ZERO,
        }
    };

    let elements = field.path().elements();
    let carried: Vec<Vec2> = (0..elements.len())
        .map(|i| joint_shift(field, i, params, upm, zones))
        .collect();

    let mut output = BezPath::new();
    let mut previous: Option<usize> = None;
    for (i, el) in elements.iter().enumerate() {
        let own = carried[i];
        let from = previous.map_or(Vec2::ZERO, |j| carried[j]);
        let moved = match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(p + along(field.anchor(i)) + own),
            PathEl::LineTo(p) => PathEl::LineTo(p + along(field.anchor(i)) + own),
            PathEl::QuadTo(a, p) => PathEl::QuadTo(
                a + along(field.control(i, 0)) + (from + own) * 0.5,
                p + along(field.anchor(i)) + own,
            ),
            PathEl::CurveTo(a, b, p) => PathEl::CurveTo(
                a + along(field.control(i, 0)) + from,
                b + along(field.control(i, 1)) + own,
                p + along(field.anchor(i)) + own,
            ),
            PathEl::ClosePath => PathEl::ClosePath,
        };
        previous = match el {
            PathEl::ClosePath => None,
            _ => Some(i),
        };
        output.push(moved);
    }
    output
}

/// Ink-trap and serif displacement for the anchor of element `index`.
fn joint_shift(
    field: &NormalField,
    index: usize,
    params: &DesignParams,
    upm: f64,
    zones: &[Zone],
) -> Vec2 {
    let (Some(normal), Some(p)) = (field.anchor(index), anchor(&field.path().elements()[index]))
    else {
        return Vec2::ZERO;
    };
    let mut shift = Vec2::ZERO;

    if params.ink_trap > 0.0 {
        if let Some((incoming, outgoing)) = field.sides(index) {
            let dot = incoming.dot(outgoing);
            if dot < INK_TRAP_DOT {
                let depth = params.ink_trap / 100.0 * INK_TRAP_SHIFT * upm * (1.0 - dot);
                shift -= normal * depth;
            }
        }
    }

    if params.serif > 0.0 && normal.x.abs() > SERIF_VERTICAL && near_zone(p, zones, upm) {
        let reach = params.serif / 100.0 * SERIF_SHIFT * upm;
        shift += Vec2::new(normal.x.signum() * reach, 0.0);
    }

    shift
}

fn near_zone(p: Point, zones: &[Zone], upm: f64) -> bool {
    let band = SERIF_ZONE_BAND * upm;
    zones.iter().any(|z| (p.y - z.y).abs() <= band)
}

/// Scale curve handles by (1 + roundness/100).
///
/// Cubic handles scale from their own anchor; a quadratic control scales
/// from the midpoint of its chord.
pub fn round_handles(path: &BezPath, roundness: f64) -> BezPath {
    let k = 1.0 + roundness / 100.0;
    let mut output = BezPath::new();
    let mut current = Point::ZERO;
    for el in path.elements() {
        let scaled = match *el {
            PathEl::CurveTo(a, b, p) => {
                PathEl::CurveTo(current + (a - current) * k, p + (b - p) * k, p)
            }
            PathEl::QuadTo(a, p) => {
                let mid = current.midpoint(p);
                PathEl::QuadTo(mid + (a - mid) * k, p)
            }
            other => other,
        };
        if let Some(p) = anchor(el) {
            current = p;
        }
        output.push(scaled);
    }
    output
}
