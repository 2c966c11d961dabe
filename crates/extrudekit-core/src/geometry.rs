//! Planar geometry for toolpath generation
//!
//! All coordinates are millimetres in the logical (unrotated) print frame.
//! Rotation is applied only when a coordinate is written out.

use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// sin(45°), used for the diagonal fill pitch and the perimeter limit.
pub const SIN_45: f64 = FRAC_1_SQRT_2;

/// A point in the XY plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Rotate `point` clockwise about `center` by `angle_degrees`.
pub fn rotate(point: Point2D, center: Point2D, angle_degrees: f64) -> Point2D {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point2D {
        x: cos * dx + sin * dy + center.x,
        y: cos * dy - sin * dx + center.y,
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point2D, b: Point2D) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Filament length fed per millimetre of deposited line.
///
/// The deposited cross-section (`line_width * layer_height`) divided by the
/// filament cross-section.
pub fn extrusion_ratio(line_width: f64, layer_height: f64, filament_diameter: f64) -> f64 {
    line_width * layer_height / (PI * (filament_diameter / 2.0).powi(2))
}

/// Axis-aligned rectangle with strictly positive extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point2D,
    pub max: Point2D,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and size.
    pub fn from_corner(min: Point2D, width: f64, height: f64) -> Result<Self> {
        for (name, value) in [
            ("x", min.x),
            ("y", min.y),
            ("width", width),
            ("height", height),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::DegenerateRect { width, height });
        }
        Ok(Self {
            min,
            max: min.offset(width, height),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Shrink every side by `inset`. Fails when nothing would remain.
    pub fn inset(&self, inset: f64) -> Result<Self> {
        let width = self.width() - 2.0 * inset;
        let height = self.height() - 2.0 * inset;
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::InsetCollapsed {
                inset,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(Self {
            min: self.min.offset(inset, inset),
            max: self.max.offset(-inset, -inset),
        })
    }

    /// True when `p` lies inside or on the boundary, within `tolerance`.
    pub fn contains(&self, p: Point2D, tolerance: f64) -> bool {
        p.x >= self.min.x - tolerance
            && p.x <= self.max.x + tolerance
            && p.y >= self.min.y - tolerance
            && p.y <= self.max.y + tolerance
    }
}
