//! Calibration pattern generators
//!
//! Each generator drives a [`crate::GcodeWriter`] and leaves the machine
//! state where its last command put it.

pub mod cube;
pub mod diagonal_fill;
pub mod line;
pub mod perimeter_box;
pub mod plane;

use crate::error::{ToolpathError, ToolpathResult};
use crate::writer::GcodeWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Travel acceleration set before each pattern, in mm/s².
pub const TRAVEL_ACCELERATION: u32 = 800;

/// Pattern selected by a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// A single straight test line
    Line,
    /// A square of nested perimeters with diagonal fill
    Plane,
    /// Reserved; produces no motion
    Cube,
}

impl PatternMode {
    pub const ALL: [PatternMode; 3] = [PatternMode::Line, PatternMode::Plane, PatternMode::Cube];

    pub fn name(&self) -> &'static str {
        match self {
            PatternMode::Line => "line",
            PatternMode::Plane => "plane",
            PatternMode::Cube => "cube",
        }
    }

    /// Emit this pattern's body for `iteration`.
    pub fn generate(&self, writer: &mut GcodeWriter<'_>, iteration: u32) -> ToolpathResult<()> {
        match self {
            PatternMode::Line => line::generate(writer, iteration),
            PatternMode::Plane => plane::generate(writer, iteration),
            PatternMode::Cube => cube::generate(writer, iteration),
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternMode {
    type Err = ToolpathError;

    /// Accepts full names and single-letter forms, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "l" => Ok(PatternMode::Line),
            "plane" | "p" => Ok(PatternMode::Plane),
            "cube" | "c" => Ok(PatternMode::Cube),
            _ => Err(ToolpathError::UnknownMode(s.to_string())),
        }
    }
}
