//! Counters collected while emitting a program.

use serde::{Deserialize, Serialize};

/// Summary of the motion emitted by a [`crate::GcodeWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionStats {
    /// Non-extruding XY moves
    pub travel_moves: usize,
    pub print_moves: usize,
    pub retractions: usize,
    pub unretractions: usize,
    /// Travel distance in mm
    pub travel_distance: f64,
    /// Extruded path length in mm
    pub print_distance: f64,
    /// Sum of unrounded E values of print moves, in mm of filament
    pub filament_used: f64,
}

impl EmissionStats {
    pub fn total_moves(&self) -> usize {
        self.travel_moves + self.print_moves
    }
}
