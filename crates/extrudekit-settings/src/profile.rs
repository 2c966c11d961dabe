//! Physical machine constants
//!
//! A [`MachineProfile`] describes the printer, nozzle and filament. Derived
//! quantities (extrusion ratio, line spacing, anchor widths) are not stored
//! here; they are computed once when a [`crate::Settings`] is built from it.

use serde::{Deserialize, Serialize};

/// Printer, nozzle and filament constants.
///
/// Speeds are in mm/min, lengths in mm, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineProfile {
    /// Display name written into generated programs
    pub extruder_name: String,
    /// Bed size along X
    pub bed_x: f64,
    /// Bed size along Y
    pub bed_y: f64,
    pub filament_diameter: f64,
    pub nozzle_diameter: f64,
    /// Target deposited line width
    pub line_width: f64,
    pub layer_height: f64,
    pub first_layer_height: f64,
    pub first_layer_speed: f64,
    pub travel_speed: f64,
    pub z_speed: f64,
    pub perimeter_speed: f64,
    pub retract_speed: f64,
    pub unretract_speed: f64,
    pub retract_distance: f64,
    pub zhop_enable: bool,
    pub zhop_height: f64,
    /// Rotation applied to every output coordinate about the bed centre
    pub print_direction: f64,
    pub extrusion_multiplier: f64,
    /// Anchor-layer line width as a percentage of the nozzle diameter
    pub anchor_line_ratio: f64,
    pub anchor_perimeters: u32,
    pub xy_round: u32,
    pub z_round: u32,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self::prusa_mk3s()
    }
}

impl MachineProfile {
    /// Prusa i3 MK3S with a 0.4mm nozzle and 1.75mm filament.
    pub fn prusa_mk3s() -> Self {
        Self {
            extruder_name: "PSO Printer".to_string(),
            bed_x: 200.0,
            bed_y: 250.0,
            filament_diameter: 1.75,
            nozzle_diameter: 0.4,
            line_width: 0.5,
            layer_height: 0.3,
            first_layer_height: 0.2,
            first_layer_speed: 40.0 * 60.0,
            travel_speed: 80.0 * 60.0,
            z_speed: 12.0 * 60.0,
            perimeter_speed: 50.0 * 60.0,
            retract_speed: 30.0 * 60.0,
            unretract_speed: 30.0 * 60.0,
            retract_distance: 1.5,
            zhop_enable: true,
            zhop_height: 0.2,
            print_direction: 0.0,
            extrusion_multiplier: 1.0,
            anchor_line_ratio: 100.0,
            anchor_perimeters: 4,
            xy_round: 4,
            z_round: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = MachineProfile::default();
        assert_eq!(profile.first_layer_speed, 2400.0);
        assert_eq!(profile.travel_speed, 4800.0);
        assert_eq!(profile.z_speed, 720.0);
        assert!(profile.zhop_enable);
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let profile: MachineProfile = serde_json::from_str(r#"{"nozzle_diameter": 0.6}"#).unwrap();
        assert_eq!(profile.nozzle_diameter, 0.6);
        assert_eq!(profile.filament_diameter, 1.75);
    }
}
