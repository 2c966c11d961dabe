//! Machine state tracked while emitting a program.

use extrudekit_core::Point2D;
use serde::{Deserialize, Serialize};

/// Logical nozzle position and filament state of one generation session.
///
/// Coordinates are kept at full precision in the unrotated frame; rounding
/// and `print_dir` rotation are applied only to emitted words. `z` is the
/// logical layer height and does not include an active Z-hop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// True while filament is pulled back from the nozzle
    pub retracted: bool,
}

impl MachineState {
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub(crate) fn set_position(&mut self, point: Point2D) {
        self.x = point.x;
        self.y = point.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = MachineState::default();
        assert_eq!(state.position(), Point2D::ORIGIN);
        assert_eq!(state.z, 0.0);
        assert!(!state.retracted);
    }
}
