//! Error handling for ExtrudeKit core
//!
//! Geometry helpers are total functions; the only failures at this layer
//! come from constructing shapes that cannot be printed (zero or negative
//! extents, insets that consume the whole rectangle).

use thiserror::Error;

/// Geometry error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A rectangle was requested with a non-positive width or height
    #[error("Degenerate rectangle: {width} x {height} mm")]
    DegenerateRect {
        /// Requested width in millimetres.
        width: f64,
        /// Requested height in millimetres.
        height: f64,
    },

    /// Insetting a rectangle left no area behind
    #[error("Inset of {inset} mm collapses a {width} x {height} mm rectangle")]
    InsetCollapsed {
        /// Inset applied to every side, in millimetres.
        inset: f64,
        /// Width of the rectangle before the inset.
        width: f64,
        /// Height of the rectangle before the inset.
        height: f64,
    },

    /// A value that must be finite was NaN or infinite
    #[error("Non-finite value for {name}: {value}")]
    NonFinite {
        /// Name of the offending quantity.
        name: String,
        /// The offending value.
        value: f64,
    },
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
