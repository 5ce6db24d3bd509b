use thiserror::Error;

/// Errors at the edges of the engine (glyph conversion and file I/O).
///
/// Geometry operations themselves never fail; degenerate input falls
/// back to returning the path unchanged.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutlineError {
    #[error("empty contour")]
    EmptyContour,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("glyph '{0}' not found")]
    GlyphNotFound(String),

    #[cfg(feature = "ufo")]
    #[error("norad error: {0}")]
    Norad(#[from] norad::error::FontLoadError),

    #[cfg(feature = "ufo")]
    #[error("norad write error: {0}")]
    NoradWrite(#[from] norad::error::FontWriteError),
}
