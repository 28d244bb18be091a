//! Error types for map initialization.

use thiserror::Error;

use crate::library::LibraryName;

/// Errors that abort map initialization.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("no container element with id '{0}'")]
    MissingContainer(String),

    #[error("failed to import the '{library}' library: {reason}")]
    LibraryUnavailable { library: LibraryName, reason: String },

    #[error("invalid coordinate for '{name}': ({lat}, {lng})")]
    InvalidCoordinate { name: String, lat: f64, lng: f64 },

    #[error(transparent)]
    Glyph(#[from] GlyphError),
}

/// Errors from parsing an inline SVG glyph.
#[derive(Debug, Error, PartialEq)]
pub enum GlyphError {
    #[error("malformed glyph markup: {0}")]
    Svg(String),

    #[error("glyph has nothing to draw")]
    NoPaths,
}
