//! Shared spatial remap: one point in, one point out.
//!
//! Stages run in a fixed order: width, slant, x-height, ascender and
//! descender extension, overshoot, optical size.

use kurbo::{Point, Rect};

use crate::config::{DesignParams, FontMetrics};
use crate::geom::unit;

/// Height of the blend band above the x-height zone (fraction of upm).
const X_HEIGHT_BLEND: f64 = 0.08;
/// Distance from a zone line within which overshoot applies (fraction of upm).
const OVERSHOOT_BAND: f64 = 0.012;
/// Overshoot nudge at full slider (fraction of upm).
const OVERSHOOT_SHIFT: f64 = 0.015;
/// Optical-size radial push at full slider (fraction of upm).
const OPTICAL_SHIFT: f64 = 0.03;

/// A vertical alignment line and the direction that counts as "outward".
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub y: f64,
    pub outward: f64,
}

/// Point remap derived from the sliders and the glyph's original bounds.
pub struct Remap {
    params: DesignParams,
    upm: f64,
    x_height: f64,
    bounds: Rect,
    zones: [Zone; 4],
}

impl Remap {
    pub fn new(params: &DesignParams, metrics: &FontMetrics, bounds: Rect) -> Self {
        let mut remap = Remap {
            params: *params,
            upm: metrics.units_per_em,
            x_height: metrics.x_height(),
            bounds,
            zones: [Zone { y: 0.0, outward: -1.0 }; 4],
        };
        remap.zones = [
            Zone { y: 0.0, outward: -1.0 },
            Zone { y: remap.vertical(remap.x_height), outward: 1.0 },
            Zone { y: remap.vertical(metrics.ascender), outward: 1.0 },
            Zone { y: remap.vertical(metrics.descender), outward: -1.0 },
        ];
        remap
    }

    /// Alignment lines after the vertical remap: baseline, x-height,
    /// ascender, descender.
    pub fn zones(&self) -> &[Zone; 4] {
        &self.zones
    }

    pub fn apply(&self, p: Point) -> Point {
        let params = &self.params;
        let mut x = p.x;
        if params.width != 0.0 {
            let cx = self.bounds.center().x;
            x = cx + (x - cx) * (1.0 + params.width / 100.0);
        }
        if params.slant != 0.0 {
            x += p.y * params.slant.to_radians().tan();
        }
        let mut y = self.vertical(p.y);
        if params.overshoot != 0.0 {
            y = self.overshoot(y);
        }
        let q = Point::new(x, y);
        if params.optical_size != 0.0 {
            self.optical(q)
        } else {
            q
        }
    }

    /// X-height scaling followed by ascender/descender extension.
    fn vertical(&self, y: f64) -> f64 {
        let params = &self.params;
        let xh = self.x_height;
        let mut out = y;
        // Where x-height lands after its own scaling.
        let mut pinned_xh = xh;
        if params.x_height != 0.0 && xh > 0.0 {
            let factor = 1.0 + params.x_height / 100.0;
            let band = X_HEIGHT_BLEND * self.upm;
            pinned_xh = xh * factor;
            if (0.0..=xh).contains(&y) {
                out = y * factor;
            } else if y > xh && y < xh + band {
                let s = (y - xh) / band;
                out = y + xh * (factor - 1.0) * (1.0 - smoothstep(s));
            }
        }
        if params.ascender_extend != 0.0 && y > xh {
            out = pinned_xh + (out - pinned_xh) * (1.0 + params.ascender_extend / 100.0);
        }
        if params.descender_extend != 0.0 && y < 0.0 {
            out *= 1.0 + params.descender_extend / 100.0;
        }
        out
    }

    fn overshoot(&self, y: f64) -> f64 {
        let band = OVERSHOOT_BAND * self.upm;
        let shift = self.params.overshoot / 100.0 * OVERSHOOT_SHIFT * self.upm;
        match self.zones.iter().find(|z| (y - z.y).abs() <= band) {
            Some(zone) => y + zone.outward * shift,
            None => y,
        }
    }

    /// Push points away from the glyph center, more so near the center.
    fn optical(&self, p: Point) -> Point {
        let center = self.bounds.center();
        let half_diagonal = self.bounds.size().to_vec2().hypot() / 2.0;
        if half_diagonal <= 0.0 {
            return p;
        }
        let Some(dir) = unit(p - center) else {
            return p;
        };
        let closeness = (1.0 - (p - center).hypot() / half_diagonal).clamp(0.0, 1.0);
        let shift = self.params.optical_size / 100.0 * OPTICAL_SHIFT * self.upm;
        p + dir * (closeness * shift)
    }
}

fn smoothstep(s: f64) -> f64 {
    let s = s.clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remap(params: DesignParams) -> Remap {
        Remap::new(
            &params,
            &FontMetrics::default(),
            Rect::new(0.0, 0.0, 400.0, 600.0),
        )
    }

    #[test]
    fn zero_params_are_identity() {
        let r = remap(DesignParams::default());
        for p in [Point::new(0.0, 0.0), Point::new(123.0, 576.0), Point::new(-40.0, -180.0)] {
            assert_eq!(r.apply(p), p);
        }
    }

    #[test]
    fn width_scales_about_center() {
        let r = remap(DesignParams { width: 50.0, ..Default::default() });
        assert_eq!(r.apply(Point::new(0.0, 10.0)), Point::new(-100.0, 10.0));
        assert_eq!(r.apply(Point::new(200.0, 10.0)), Point::new(200.0, 10.0));
    }

    #[test]
    fn slant_is_anchored_at_baseline() {
        let r = remap(DesignParams { slant: 10.0, ..Default::default() });
        assert_eq!(r.apply(Point::new(50.0, 0.0)), Point::new(50.0, 0.0));
        assert!(r.apply(Point::new(50.0, 500.0)).x > 130.0);
    }

    #[test]
    fn x_height_blend_is_continuous() {
        let r = remap(DesignParams { x_height: 20.0, ..Default::default() });
        let xh = FontMetrics::default().x_height();
        let at = r.vertical(xh);
        let just_above = r.vertical(xh + 0.001);
        assert!((at - xh * 1.2).abs() < 1e-9);
        assert!((at - just_above).abs() < 0.01);
        assert_eq!(r.vertical(xh + 200.0), xh + 200.0);
        assert_eq!(r.vertical(-50.0), -50.0);
    }

    #[test]
    fn extenders_are_pinned_at_their_boundary() {
        let r = remap(DesignParams {
            ascender_extend: 50.0,
            descender_extend: 50.0,
            ..Default::default()
        });
        let xh = FontMetrics::default().x_height();
        assert_eq!(r.vertical(xh), xh);
        assert_eq!(r.vertical(xh + 100.0), xh + 150.0);
        assert_eq!(r.vertical(-100.0), -150.0);
        assert_eq!(r.vertical(0.0), 0.0);
    }

    #[test]
    fn ascender_extend_starts_where_x_height_lands() {
        let r = remap(DesignParams {
            x_height: 20.0,
            ascender_extend: 50.0,
            ..Default::default()
        });
        let xh = FontMetrics::default().x_height();
        let at = r.vertical(xh);
        assert!((at - xh * 1.2).abs() < 1e-9);
        assert!((r.vertical(xh + 1e-3) - at).abs() < 0.01);
        assert!((r.vertical(xh - 1e-3) - at).abs() < 0.01);
        // Above the blend band only the ascender stretch applies.
        let y = xh + 300.0;
        assert!((r.vertical(y) - (at + (y - at) * 1.5)).abs() < 1e-9);
    }

    #[test]
    fn overshoot_pushes_outward_near_zones() {
        let r = remap(DesignParams { overshoot: 100.0, ..Default::default() });
        assert_eq!(r.apply(Point::new(0.0, 0.0)).y, -15.0);
        assert_eq!(r.apply(Point::new(0.0, 800.0)).y, 815.0);
        assert_eq!(r.apply(Point::new(0.0, 300.0)).y, 300.0);
    }

    #[test]
    fn optical_size_opens_the_center() {
        let r = remap(DesignParams { optical_size: 100.0, ..Default::default() });
        let near = r.apply(Point::new(210.0, 300.0));
        assert!(near.x > 210.0 && near.x < 240.0);
        let corner = r.apply(Point::new(0.0, 0.0));
        assert!(corner.to_vec2().hypot() < 1e-6);
    }
}
