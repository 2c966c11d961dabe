//! Nested rectangular perimeters with optional diagonal fill.

use super::diagonal_fill;
use crate::error::{ToolpathError, ToolpathResult};
use crate::writer::{ExtrudeOptions, GcodeWriter};
use extrudekit_core::{Point2D, Rect, SIN_45};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fraction of a line spacing the fill overlaps the innermost perimeter.
pub const FILL_ENCROACHMENT: f64 = 0.25;

/// A box of `perimeters` concentric rings drawn inward from `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Lower-left corner of the outermost ring
    pub origin: Point2D,
    pub width: f64,
    pub height: f64,
    /// Requested ring count; clamped to what fits
    pub perimeters: u32,
    /// Centre-to-centre distance of adjacent rings and fill lines
    pub spacing: f64,
    pub ext_ratio: f64,
    pub fill: bool,
}

/// What [`perimeter_box`] actually printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxReport {
    pub rings: u32,
    pub fill_strokes: usize,
}

/// Largest ring count that fits a `width` x `height` box at `spacing`.
pub fn max_perimeters(width: f64, height: f64, spacing: f64) -> u32 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return 0;
    }
    let diagonal_pitch = spacing / SIN_45;
    let fit = |size: f64| (size * SIN_45 / diagonal_pitch).floor().max(0.0) as u32;
    fit(width).min(fit(height))
}

/// Draw the rings of `spec`, outermost first, then fill the interior.
///
/// Each ring is drawn up, right, down, then left. A request for more rings
/// than fit is clamped with a warning; a box too small for a single ring is
/// an error.
pub fn perimeter_box(writer: &mut GcodeWriter<'_>, spec: &BoxSpec) -> ToolpathResult<BoxReport> {
    let outline = Rect::from_corner(spec.origin, spec.width, spec.height)?;
    if !(spec.spacing.is_finite() && spec.spacing > 0.0) {
        return Err(ToolpathError::InvalidShape(format!(
            "perimeter spacing must be > 0, got {}",
            spec.spacing
        )));
    }

    let max = max_perimeters(spec.width, spec.height, spec.spacing);
    let rings = spec.perimeters.min(max);
    if rings < spec.perimeters {
        warn!(
            requested = spec.perimeters,
            max, "Too many perimeters for box size, clamping"
        );
    }
    if rings == 0 && spec.perimeters > 0 {
        return Err(ToolpathError::InvalidShape(format!(
            "{} x {} mm box has no room for a perimeter at {} mm spacing",
            spec.width, spec.height, spec.spacing
        )));
    }

    debug!(rings, width = spec.width, height = spec.height, "Drawing perimeter box");

    if writer.position() != spec.origin {
        writer.move_xy(spec.origin, "Move to box start");
    }

    let mut corner = spec.origin;
    for ring in 0..rings {
        if ring != 0 {
            corner = corner.offset(spec.spacing, spec.spacing);
            writer.move_xy(corner, "Step inwards to print next perimeter");
        }

        let shrink = 2.0 * spec.spacing * f64::from(ring);
        let width = spec.width - shrink;
        let height = spec.height - shrink;
        let edge = |comment| ExtrudeOptions::commented(comment).with_ext_ratio(spec.ext_ratio);

        let top_left = corner.offset(0.0, height);
        let top_right = top_left.offset(width, 0.0);
        let bottom_right = top_right.offset(0.0, -height);
        writer.extrude(top_left, edge("Draw perimeter (up)"));
        writer.extrude(top_right, edge("Draw perimeter (right)"));
        writer.extrude(bottom_right, edge("Draw perimeter (down)"));
        writer.extrude(corner, edge("Draw perimeter (left)"));
    }

    let mut report = BoxReport {
        rings,
        fill_strokes: 0,
    };
    if spec.fill {
        let inset = spec.spacing * f64::from(rings.saturating_sub(1))
            + spec.spacing * FILL_ENCROACHMENT;
        let interior = outline.inset(inset)?;
        report.fill_strokes =
            diagonal_fill::emit(writer, &interior, spec.spacing, spec.ext_ratio)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrudekit_settings::Settings;

    fn spec(perimeters: u32, fill: bool) -> BoxSpec {
        BoxSpec {
            origin: Point2D::new(10.0, 10.0),
            width: 15.0,
            height: 15.0,
            perimeters,
            spacing: 0.45,
            ext_ratio: 0.05,
            fill,
        }
    }

    #[test]
    fn test_max_perimeters() {
        assert_eq!(max_perimeters(15.0, 15.0, 0.45), 16);
        assert_eq!(max_perimeters(15.0, 2.0, 0.45), 2);
        assert_eq!(max_perimeters(0.5, 15.0, 0.45), 0);
        assert_eq!(max_perimeters(15.0, 15.0, 0.0), 0);
    }

    #[test]
    fn test_single_ring_path() {
        let settings = Settings {
            zhop_enable: false,
            ..Default::default()
        };
        let mut writer = GcodeWriter::new(&settings);
        let report = perimeter_box(&mut writer, &spec(1, false)).unwrap();
        assert_eq!(report.rings, 1);

        let lines: Vec<_> = writer.output().lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("G1 E-1.5"));
        assert!(lines[1].starts_with("G0 X10 Y10 F4800 ; Move to box start"));
        assert!(lines[3].starts_with("G1 X10 Y25 "));
        assert!(lines[4].starts_with("G1 X25 Y25 "));
        assert!(lines[5].starts_with("G1 X25 Y10 "));
        assert!(lines[6].starts_with("G1 X10 Y10 "));
        assert!(lines[6].ends_with("; Draw perimeter (left)"));
        assert_eq!(writer.position(), Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_already_at_origin_skips_travel() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let mut at_origin = spec(1, false);
        at_origin.origin = Point2D::ORIGIN;
        perimeter_box(&mut writer, &at_origin).unwrap();
        assert!(!writer.output().contains("Move to box start"));
        assert_eq!(writer.stats().travel_moves, 0);
    }

    #[test]
    fn test_rings_step_inward() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let report = perimeter_box(&mut writer, &spec(3, false)).unwrap();
        assert_eq!(report.rings, 3);
        assert_eq!(
            writer
                .output()
                .matches("Step inwards to print next perimeter")
                .count(),
            2
        );
        assert_eq!(writer.stats().print_moves, 12);
        let corner = writer.position();
        assert!((corner.x - 10.9).abs() < 1e-9);
        assert!((corner.y - 10.9).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_ring_count() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let report = perimeter_box(&mut writer, &spec(40, false)).unwrap();
        assert_eq!(report.rings, 16);
        assert_eq!(writer.stats().print_moves, 64);
    }

    #[test]
    fn test_no_room_is_an_error() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let mut tiny = spec(2, false);
        tiny.width = 0.5;
        assert!(matches!(
            perimeter_box(&mut writer, &tiny),
            Err(ToolpathError::InvalidShape(_))
        ));
        assert!(writer.output().is_empty());
    }

    #[test]
    fn test_degenerate_size_is_an_error() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let mut flat = spec(2, false);
        flat.height = 0.0;
        assert!(matches!(
            perimeter_box(&mut writer, &flat),
            Err(ToolpathError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_fill_follows_rings() {
        let settings = Settings::default();
        let mut writer = GcodeWriter::new(&settings);
        let report = perimeter_box(&mut writer, &spec(4, true)).unwrap();
        assert_eq!(report.rings, 4);
        assert!(report.fill_strokes > 0);
        assert!(writer.output().contains("Move to fill start"));
        assert_eq!(writer.stats().print_moves, 16 + report.fill_strokes);
    }
}
