//! Plane pattern
//!
//! A filled square of anchor perimeters. Successive iterations are laid
//! out side by side along X.

use super::perimeter_box::{perimeter_box, BoxSpec};
use super::TRAVEL_ACCELERATION;
use crate::error::ToolpathResult;
use crate::writer::GcodeWriter;
use extrudekit_core::{GcodeCommand, Point2D};
use tracing::debug;

/// Side length of the square, in mm.
pub const PLANE_SIZE: f64 = 15.0;
/// Gap between successive squares, in mm.
pub const PLANE_GAP: f64 = 5.0;

/// Lower-left corner of the square for `iteration` (1-based).
pub fn plane_origin(iteration: u32, line_spacing: f64) -> Point2D {
    let index = f64::from(iteration.saturating_sub(1));
    Point2D::new(line_spacing + index * (PLANE_SIZE + PLANE_GAP), 0.0)
}

pub fn generate(writer: &mut GcodeWriter<'_>, iteration: u32) -> ToolpathResult<()> {
    let settings = writer.settings();
    let spec = BoxSpec {
        origin: plane_origin(iteration, settings.line_spacing),
        width: PLANE_SIZE,
        height: PLANE_SIZE,
        perimeters: settings.anchor_perimeters,
        spacing: settings.anchor_line_spacing,
        ext_ratio: settings.anchor_ext_ratio,
        fill: true,
    };

    writer.move_z(settings.first_layer_height);
    writer.move_xy(Point2D::ORIGIN, "Moving to plane position");
    writer.command(&GcodeCommand::new("M204").param('S', TRAVEL_ACCELERATION));
    writer.comment("printing plane start id:0 copy 0");
    let report = perimeter_box(writer, &spec)?;
    writer.comment("stop printing plane id:0 copy 0");

    debug!(iteration, rings = report.rings, fill_strokes = report.fill_strokes, "Plane done");
    Ok(())
}
