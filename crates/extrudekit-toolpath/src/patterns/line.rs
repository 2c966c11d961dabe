//! Single-line pattern
//!
//! Prints one straight line per iteration. Successive iterations step along
//! X so a series of lines can be printed side by side and compared.

use super::TRAVEL_ACCELERATION;
use crate::error::ToolpathResult;
use crate::writer::{ExtrudeOptions, GcodeWriter};
use extrudekit_core::{GcodeCommand, Point2D};
use tracing::debug;

/// X distance between the starts of successive iterations, in mm.
pub const LINE_PITCH: f64 = 15.0;
/// Y offset of the line above `line_spacing`, in mm.
pub const LINE_BASE_Y: f64 = 10.0;
/// Printed line length, in mm.
pub const LINE_LENGTH: f64 = 100.0;

/// Start point of the line for `iteration`.
pub fn line_start(iteration: u32, line_spacing: f64) -> Point2D {
    Point2D::new(f64::from(iteration) * LINE_PITCH, line_spacing + LINE_BASE_Y)
}

pub fn generate(writer: &mut GcodeWriter<'_>, iteration: u32) -> ToolpathResult<()> {
    let settings = writer.settings();
    let start = line_start(iteration, settings.line_spacing);
    let end = start.offset(LINE_LENGTH, 0.0);
    debug!(iteration, ?start, ?end, "Generating line");

    writer.move_z(settings.first_layer_height);
    writer.move_xy(start, "Moving to line position");
    writer.command(&GcodeCommand::new("M204").param('S', TRAVEL_ACCELERATION));
    writer.comment("printing line start id:0 copy 0");
    writer.extrude(end, ExtrudeOptions::commented("Create Line"));
    writer.comment("stop printing line id:0 copy 0");
    writer.force_retract();

    Ok(())
}
