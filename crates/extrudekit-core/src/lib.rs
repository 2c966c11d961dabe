//! # ExtrudeKit Core
//!
//! Core types and pure functions shared by the ExtrudeKit crates:
//! planar geometry (rotation about the bed centre, distances, rectangles),
//! the extrusion-ratio conversion, fixed-precision number formatting and
//! the [`GcodeCommand`] line builder that keeps axis words in a stable order.

pub mod command;
pub mod error;
pub mod geometry;
pub mod units;

pub use command::GcodeCommand;
pub use error::{GeometryError, Result};
pub use geometry::{distance, extrusion_ratio, rotate, Point2D, Rect, SIN_45};
pub use units::{format_decimal, round_to, EXTRUSION_DIGITS, FEED_DIGITS};
