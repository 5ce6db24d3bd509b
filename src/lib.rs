//! glyphforge: outline geometry engine for type-design editors.
//!
//! Every operation takes a glyph outline as one `kurbo::BezPath` (each
//! `MoveTo` opens a contour) and returns a new one. Nothing is mutated
//! in place and degenerate input falls back to returning the input.
//!
//! # Example
//!
//! ```
//! use glyphforge::kurbo::BezPath;
//! use glyphforge::{simplify, SimplifyConfig};
//!
//! let mut path = BezPath::new();
//! path.move_to((0.0, 0.0));
//! path.curve_to((50.0, 0.0), (100.0, 0.0), (150.0, 0.0));
//! path.curve_to((200.0, 0.0), (250.0, 0.0), (300.0, 0.0));
//!
//! let simpler = simplify(&path, &SimplifyConfig::for_units_per_em(1000.0));
//! assert_eq!(simpler.elements().len(), 2);
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod contour;
pub mod degree;
pub mod design;
pub mod error;
pub mod indent;
pub mod normals;
pub mod simplify;
pub mod slice;
pub mod transform;

#[cfg(feature = "ufo")]
pub mod ufo;

// Re-export kurbo so callers build paths with the same version.
pub use kurbo;

pub use config::{DesignParams, FontMetrics, SimplifyConfig};
pub use contour::Winding;
pub use degree::Degree;
pub use design::DesignResult;
pub use error::OutlineError;
pub use indent::{GeoClipper, PolygonClipper, Ring};
pub use normals::NormalField;
pub use simplify::simplify;
pub use slice::{slice, Intersection};
pub use transform::Axis;
