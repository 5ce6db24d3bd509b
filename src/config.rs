//! Parameter records for the design pipeline and the simplifier.
//!
//! All of these are plain values: cheap to clone, adjustable at runtime
//! (editor sliders), and serializable for presets with the `serde` feature.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Font-wide vertical metrics supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontMetrics {
    /// Grid resolution of one em.
    pub units_per_em: f64,
    /// Ascender line, in font units above the baseline.
    pub ascender: f64,
    /// Descender line, in font units (typically negative).
    pub descender: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
        }
    }
}

impl FontMetrics {
    /// Estimated x-height, used as the top of the lowercase zone.
    pub fn x_height(&self) -> f64 {
        self.ascender * 0.72
    }
}

/// Design sliders. All zero is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DesignParams {
    // -- Normal-based --
    /// Stroke weight offset, -100..100 (percent of the maximum offset).
    pub weight: f64,
    /// Thick/thin stroke contrast, -100..100. Positive thickens verticals.
    pub contrast: f64,
    /// Ink trap depth at acute interior joints, 0..100.
    pub ink_trap: f64,
    /// Serif extension at zone boundaries, 0..100.
    pub serif: f64,

    // -- Spatial remap --
    /// Horizontal scale about the glyph center, -100..100 percent.
    pub width: f64,
    /// Optical-size counter opening, -100..100.
    pub optical_size: f64,
    /// X-height zone scale, -100..100 percent.
    pub x_height: f64,
    /// Ascender stretch above the x-height, -100..100 percent.
    pub ascender_extend: f64,
    /// Descender stretch below the baseline, -100..100 percent.
    pub descender_extend: f64,
    /// Italic shear in degrees, -30..30.
    pub slant: f64,
    /// Overshoot nudge at alignment zones, -100..100.
    pub overshoot: f64,

    // -- Other --
    /// Sidebearing shift in font units, -200..200.
    pub spacing: f64,
    /// Curve handle length scale, -100..100 percent.
    pub roundness: f64,
}

impl DesignParams {
    /// Copy of `self` with every slider clamped into its range.
    pub fn clamped(&self) -> Self {
        let pct = |v: f64| v.clamp(-100.0, 100.0);
        Self {
            weight: pct(self.weight),
            contrast: pct(self.contrast),
            ink_trap: self.ink_trap.clamp(0.0, 100.0),
            serif: self.serif.clamp(0.0, 100.0),
            width: pct(self.width),
            optical_size: pct(self.optical_size),
            x_height: pct(self.x_height),
            ascender_extend: pct(self.ascender_extend),
            descender_extend: pct(self.descender_extend),
            slant: self.slant.clamp(-30.0, 30.0),
            overshoot: pct(self.overshoot),
            spacing: self.spacing.clamp(-200.0, 200.0),
            roundness: pct(self.roundness),
        }
    }

    /// Whether the normal field is needed at all.
    pub fn needs_normals(&self) -> bool {
        self.weight != 0.0 || self.contrast != 0.0 || self.ink_trap != 0.0 || self.serif != 0.0
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Simplifier tolerances and limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimplifyConfig {
    /// Max control-point distance from the chord for a cubic to become a line.
    pub straight_tolerance: f64,
    /// Max deviation (font units) between a merged run and its refit cubic.
    pub fit_tolerance: f64,
    /// Max distance from the running chord for a line point to be dropped.
    pub collinear_tolerance: f64,
    /// Minimum dot product of unit tangents at a smooth join.
    pub smooth_dot: f64,
    /// Cap on merge passes.
    pub max_passes: usize,
    /// Error samples per original segment.
    pub samples_per_segment: usize,
}

impl SimplifyConfig {
    /// Tolerances scaled to the em grid, never below a fixed floor.
    pub fn for_units_per_em(units_per_em: f64) -> Self {
        Self {
            straight_tolerance: (units_per_em * 0.0015).max(1.0),
            fit_tolerance: (units_per_em * 0.002).max(1.0),
            collinear_tolerance: (units_per_em * 0.001).max(0.5),
            ..Self::default()
        }
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            straight_tolerance: 1.5,
            fit_tolerance: 2.0,
            collinear_tolerance: 1.0,
            smooth_dot: 0.80,
            max_passes: 5,
            samples_per_segment: 16,
        }
    }
}
