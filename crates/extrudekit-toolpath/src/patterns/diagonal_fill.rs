//! 45° diagonal fill
//!
//! Fills a rectangle with parallel strokes running from the lower-right
//! towards the upper-left at 45°. Stroke `i` lies on the diagonal
//! `u + v = (i + 1) * pitch` in coordinates local to the rectangle's
//! lower-left corner, where `pitch = spacing / sin 45°` is the spacing
//! measured along an edge.
//!
//! The stroke endpoints walk the boundary in two chains: the low end along
//! the bottom edge then up the right edge, the high end up the left edge
//! then along the top edge. When a chain turns a corner, the leftover of
//! the previous edge (its length modulo the pitch) is absorbed into the
//! first step along the next edge, so the chains cover each edge exactly.
//!
//! Strokes alternate direction to avoid long travels between them.

use crate::error::ToolpathResult;
use crate::writer::{ExtrudeOptions, GcodeWriter};
use extrudekit_core::{distance, Point2D, Rect, SIN_45};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strokes shorter than this are dropped, in mm.
const MIN_STROKE_MM: f64 = 1e-9;

/// Which corner region of the rectangle a stroke crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillPhase {
    /// Cutting the lower-left corner; both ends still on their first edge
    Ramp,
    /// Spanning the rectangle; one end has turned its corner
    Plateau,
    /// Cutting the upper-right corner; both ends have turned
    Boundary,
}

/// One fill stroke: travel to `from`, then extrude to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillStroke {
    pub from: Point2D,
    pub to: Point2D,
    pub phase: FillPhase,
}

impl FillStroke {
    pub fn length(&self) -> f64 {
        distance(self.from, self.to)
    }
}

/// Distance between stroke intersections along an edge for a given line
/// spacing.
pub fn fill_pitch(line_spacing: f64) -> f64 {
    line_spacing / SIN_45
}

/// Compute the fill strokes for `bounds` at the given edge `pitch`.
///
/// Returns `floor(width / pitch) + floor(height / pitch)` diagonals; a
/// diagonal that degenerates to a point is omitted. Every endpoint lies on
/// the boundary of `bounds`.
pub fn fill_strokes(bounds: &Rect, pitch: f64) -> Vec<FillStroke> {
    if !(pitch.is_finite() && pitch > 0.0) {
        return Vec::new();
    }

    let width = bounds.width();
    let height = bounds.height();
    let x_count = (width / pitch).floor() as usize;
    let y_count = (height / pitch).floor() as usize;
    let shorter = x_count.min(y_count);
    let longer = x_count.max(y_count);

    let local = |u: f64, v: f64| {
        Point2D::new(
            bounds.min.x + u.clamp(0.0, width),
            bounds.min.y + v.clamp(0.0, height),
        )
    };

    let mut strokes = Vec::with_capacity(x_count + y_count);
    for i in 0..x_count + y_count {
        let reach = (i + 1) as f64 * pitch;
        let phase = if i < shorter {
            FillPhase::Ramp
        } else if i < longer {
            FillPhase::Plateau
        } else {
            FillPhase::Boundary
        };

        let (low, high) = match phase {
            FillPhase::Ramp => (local(reach, 0.0), local(0.0, reach)),
            FillPhase::Plateau if x_count > y_count => {
                (local(reach, 0.0), local(reach - height, height))
            }
            FillPhase::Plateau => (local(width, reach - width), local(0.0, reach)),
            FillPhase::Boundary => (local(width, reach - width), local(reach - height, height)),
        };

        let (from, to) = if i % 2 == 0 { (low, high) } else { (high, low) };
        let stroke = FillStroke { from, to, phase };
        if stroke.length() < MIN_STROKE_MM {
            continue;
        }
        strokes.push(stroke);
    }
    strokes
}

/// Emit a diagonal fill of `bounds`, starting with a travel to its
/// lower-left corner. Returns the number of strokes printed.
pub fn emit(
    writer: &mut GcodeWriter<'_>,
    bounds: &Rect,
    line_spacing: f64,
    ext_ratio: f64,
) -> ToolpathResult<usize> {
    let strokes = fill_strokes(bounds, fill_pitch(line_spacing));
    debug!(
        width = bounds.width(),
        height = bounds.height(),
        strokes = strokes.len(),
        "Diagonal fill"
    );

    writer.move_xy(bounds.min, "Move to fill start");
    for stroke in &strokes {
        writer.move_xy(stroke.from, "Move");
        writer.extrude(stroke.to, ExtrudeOptions::commented("Fill").with_ext_ratio(ext_ratio));
    }
    Ok(strokes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrudekit_settings::Settings;

    const EPS: f64 = 1e-9;

    fn rect(w: f64, h: f64) -> Rect {
        Rect::from_corner(Point2D::new(5.0, 7.0), w, h).unwrap()
    }

    #[test]
    fn test_stroke_count() {
        let strokes = fill_strokes(&rect(10.5, 4.5), 1.0);
        assert_eq!(strokes.len(), 14);
    }

    #[test]
    fn test_square_phases() {
        let strokes = fill_strokes(&rect(3.5, 3.5), 1.0);
        let phases: Vec<_> = strokes.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                FillPhase::Ramp,
                FillPhase::Ramp,
                FillPhase::Ramp,
                FillPhase::Boundary,
                FillPhase::Boundary,
                FillPhase::Boundary,
            ]
        );
    }

    #[test]
    fn test_strokes_are_45_degrees() {
        for stroke in fill_strokes(&rect(6.4, 2.2), 0.7) {
            let dx = stroke.to.x - stroke.from.x;
            let dy = stroke.to.y - stroke.from.y;
            assert!((dx + dy).abs() < EPS, "{:?}", stroke);
        }
    }

    #[test]
    fn test_directions_alternate() {
        let strokes = fill_strokes(&rect(4.5, 4.5), 1.0);
        assert!(strokes[0].to.y > strokes[0].from.y);
        assert!(strokes[1].to.y < strokes[1].from.y);
        assert!(strokes[2].to.y > strokes[2].from.y);
    }

    #[test]
    fn test_corner_step_absorbs_remainder() {
        // 3 full pitches along the bottom leave 0.5mm before the corner
        let bounds = rect(3.5, 10.0);
        let strokes = fill_strokes(&bounds, 1.0);
        let low = |s: &FillStroke| if s.from.y < s.to.y { s.from } else { s.to };

        let before = low(&strokes[2]);
        let after = low(&strokes[3]);
        assert!((before.x - bounds.min.x - 3.0).abs() < EPS);
        assert!((after.x - bounds.max.x).abs() < EPS);
        assert!((after.y - bounds.min.y - 0.5).abs() < EPS);
    }

    #[test]
    fn test_wide_plateau_reaches_top() {
        let bounds = rect(10.0, 2.5);
        let strokes = fill_strokes(&bounds, 1.0);
        let plateau: Vec<_> = strokes
            .iter()
            .filter(|s| s.phase == FillPhase::Plateau)
            .collect();
        assert_eq!(plateau.len(), 8);
        for stroke in plateau {
            let top = stroke.from.y.max(stroke.to.y);
            let bottom = stroke.from.y.min(stroke.to.y);
            assert!((top - bounds.max.y).abs() < EPS);
            assert!((bottom - bounds.min.y).abs() < EPS);
        }
    }

    #[test]
    fn test_too_small_gives_no_strokes() {
        assert!(fill_strokes(&rect(0.5, 0.5), 1.0).is_empty());
        assert!(fill_strokes(&rect(5.0, 5.0), 0.0).is_empty());
    }

    #[test]
    fn test_emit_starts_at_corner() {
        let settings = Settings {
            zhop_enable: false,
            ..Default::default()
        };
        let mut writer = GcodeWriter::new(&settings);
        let bounds = Rect::from_corner(Point2D::new(1.0, 1.0), 3.0, 3.0).unwrap();
        let count = emit(&mut writer, &bounds, 0.5, settings.ext_ratio).unwrap();

        let first = writer.output().lines().next().unwrap();
        assert_eq!(first, "G0 X1 Y1 F4800 ; Move to fill start");
        assert_eq!(writer.stats().print_moves, count);
        assert!(count > 0);
    }
}
